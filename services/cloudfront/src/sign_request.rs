// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Signing for the CloudFront REST API.
//!
//! CloudFront authenticates with the v2 HMAC-SHA1 scheme but signs the
//! `Date` header value alone, no canonical string is involved.
//!
//! - [Authenticating REST requests](https://docs.aws.amazon.com/AmazonCloudFront/latest/APIReference/RESTAuthentication.html)

use std::time::Duration;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, DATE};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use s3sign_aws::constants::X_AMZ_SECURITY_TOKEN;
use s3sign_aws::Credential;
use s3sign_core::hash::base64_hmac_sha1;
use s3sign_core::time::{format_http_date, now, DateTime};
use s3sign_core::{Context, Error, Result, SignRequest};

/// Request signer for the CloudFront REST API.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the signing time.
    ///
    /// # Note
    ///
    /// This is for testing only, real requests must be signed with the
    /// current time.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        parts: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let Some(cred) = credential.filter(|c| !c.is_anonymous()) else {
            debug!("no secret key available, leave request unsigned");
            return Ok(());
        };

        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "CloudFront requests can't be signed in query",
            ));
        }

        if !parts.headers.contains_key(DATE) {
            let now = self.time.unwrap_or_else(now);
            parts.headers.insert(DATE, format_http_date(now).parse()?);
        }
        let date = parts
            .headers
            .get(DATE)
            .ok_or_else(|| Error::unexpected("date header must be present"))?
            .to_str()?
            .to_string();
        debug!("calculated string to sign: {date:?}");

        if let Some(token) = &cred.session_token {
            let mut value: HeaderValue = token.parse()?;
            value.set_sensitive(true);
            parts.headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        let signature = base64_hmac_sha1(cred.secret_access_key.as_bytes(), date.as_bytes());
        let mut value: HeaderValue = format!("AWS {}:{}", cred.access_key_id, signature).parse()?;
        value.set_sensitive(true);
        parts.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}
