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

//! Legacy HMAC-SHA1 signing, also known as signature version 2.
//!
//! - [Signing and authenticating REST requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;
use std::time::Duration;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::request::Parts;
use http::{HeaderMap, HeaderValue};
use log::debug;
use percent_encoding::percent_decode_str;
use s3sign_core::hash::base64_hmac_sha1;
use s3sign_core::time::{format_http_date, now, DateTime};
use s3sign_core::utils::encode_url_string;
use s3sign_core::{
    header_names_sorted, header_values, Context, Error, Result, SignRequest, SigningMethod,
    SigningRequest,
};

use crate::constants::{CONTENT_MD5, S3_RESOURCE_PARAMS, X_AMZ_SECURITY_TOKEN};
use crate::Credential;

/// What a v2 canonical string covers beyond the fixed slots.
#[derive(Debug, Clone)]
pub struct CanonicalStringOptions {
    header_prefix: String,
    resource_params: HashSet<String>,
}

impl CanonicalStringOptions {
    /// Options for a service using `header_prefix` for its own headers and
    /// `resource_params` as the query parameters naming a sub-resource.
    ///
    /// The prefix is matched case-insensitively, parameter names are not.
    pub fn new<I, S>(header_prefix: &str, resource_params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header_prefix: header_prefix.to_ascii_lowercase(),
            resource_params: resource_params.into_iter().map(Into::into).collect(),
        }
    }

    /// Options for Amazon S3: `x-amz-` headers and the S3 sub-resources.
    pub fn s3() -> Self {
        Self::new("x-amz-", S3_RESOURCE_PARAMS.iter().copied())
    }

    /// Lowercased header prefix, such as `x-amz-`.
    pub fn header_prefix(&self) -> &str {
        &self.header_prefix
    }

    /// Date header of the service that replaces `Date`, such as `x-amz-date`.
    pub fn alternate_date_header(&self) -> String {
        format!("{}date", self.header_prefix)
    }

    /// Whether a query parameter names a sub-resource.
    pub fn is_resource_param(&self, name: &str) -> bool {
        self.resource_params.contains(name)
    }
}

impl Default for CanonicalStringOptions {
    fn default() -> Self {
        Self::s3()
    }
}

/// Build the v2 string to sign.
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource;
/// ```
///
/// `resource` is the path as sent, optionally followed by `?` and the raw
/// query string. Only sub-resource parameters are kept from the query.
///
/// The date slot is empty when the alternate date header is present, and
/// `expires` replaces it whenever given.
pub fn canonical_string(
    method: &str,
    resource: &str,
    headers: &HeaderMap,
    expires: Option<&str>,
    options: &CanonicalStringOptions,
) -> Result<String> {
    let mut s = String::with_capacity(256);

    writeln!(s, "{method}")?;
    writeln!(s, "{}", joined_header(headers, CONTENT_MD5)?)?;
    writeln!(s, "{}", joined_header(headers, CONTENT_TYPE.as_str())?)?;

    let date = match expires {
        Some(expires) => expires.to_string(),
        None if headers.contains_key(options.alternate_date_header().as_str()) => String::new(),
        None => joined_header(headers, DATE.as_str())?,
    };
    writeln!(s, "{date}")?;

    for name in header_names_sorted(headers)
        .into_iter()
        .filter(|name| name.starts_with(options.header_prefix()))
    {
        writeln!(s, "{name}:{}", joined_header(headers, name)?)?;
    }

    s.push_str(&canonical_resource(resource, options)?);

    Ok(s)
}

/// Values of a repeated header joined by `,`, untrimmed.
fn joined_header(headers: &HeaderMap, name: &str) -> Result<String> {
    Ok(header_values(headers, name)?.join(","))
}

/// Path followed by the sorted sub-resource parameters.
fn canonical_resource(resource: &str, options: &CanonicalStringOptions) -> Result<String> {
    let (path, query) = match resource.split_once('?') {
        Some((path, query)) => (path, query),
        None => (resource, ""),
    };

    let mut params = BTreeMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let mut parts = pair.split('=');
        let name = form_decode(parts.next().unwrap_or_default())?;
        let value = match parts.next() {
            Some(v) if !v.is_empty() => Some(form_decode(v)?),
            _ => None,
        };

        if options.is_resource_param(&name) {
            params.insert(name, value);
        }
    }

    if params.is_empty() {
        return Ok(path.to_string());
    }

    let params = params
        .into_iter()
        .map(|(k, v)| match v {
            Some(v) => format!("{k}={v}"),
            None => k,
        })
        .collect::<Vec<_>>();
    Ok(format!("{path}?{}", params.join("&")))
}

fn form_decode(s: &str) -> Result<String> {
    let s = s.replace('+', " ");
    Ok(percent_decode_str(&s)
        .decode_utf8()
        .map_err(|e| Error::request_invalid(format!("invalid query component: {s}")).with_source(e))?
        .into_owned())
}

/// RequestSigner that implements the S3 v2 signature.
///
/// Set `with_bucket` when the bucket lives in the host name, so it can be
/// put back in front of the canonical resource.
#[derive(Debug)]
pub struct RequestSigner {
    bucket: Option<String>,
    options: CanonicalStringOptions,

    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer for Amazon S3.
    pub fn new() -> Self {
        Self {
            bucket: None,
            options: CanonicalStringOptions::s3(),
            time: None,
        }
    }

    /// Set the bucket addressed through the host name.
    pub fn with_bucket(mut self, bucket: &str) -> Self {
        self.bucket = Some(bucket.to_string());
        self
    }

    /// Use other canonical string options, for S3 compatible services.
    pub fn with_options(mut self, options: CanonicalStringOptions) -> Self {
        self.options = options;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn resource(&self, req: &SigningRequest) -> String {
        match &self.bucket {
            Some(bucket) => format!("/{bucket}{}", req.path_and_query()),
            None => req.path_and_query(),
        }
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

        let now = self.time.unwrap_or_else(now);
        let mut req = SigningRequest::build(parts)?;

        match SigningMethod::from_expires_in(expires_in) {
            SigningMethod::Header => {
                if let Some(token) = &cred.session_token {
                    let mut value: HeaderValue = token.parse()?;
                    value.set_sensitive(true);
                    req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
                }

                let alternate_date = self.options.alternate_date_header();
                if !req.headers.contains_key(alternate_date.as_str())
                    && !req.headers.contains_key(DATE)
                {
                    req.headers.insert(DATE, format_http_date(now).parse()?);
                }

                let string_to_sign = canonical_string(
                    req.method.as_str(),
                    &self.resource(&req),
                    &req.headers,
                    None,
                    &self.options,
                )?;
                debug!("calculated string to sign: {string_to_sign:?}");

                let signature =
                    base64_hmac_sha1(cred.secret_access_key.as_bytes(), string_to_sign.as_bytes());
                let mut value: HeaderValue =
                    format!("AWS {}:{}", cred.access_key_id, signature).parse()?;
                value.set_sensitive(true);
                req.headers.insert(AUTHORIZATION, value);
            }
            SigningMethod::Query(expire) => {
                let expire = chrono::TimeDelta::from_std(expire)
                    .map_err(|e| Error::config_invalid("expires_in is out of range").with_source(e))?;
                let expires = (now + expire).timestamp().to_string();

                // The token is a signed header even though it travels in the query.
                let mut headers = req.headers.clone();
                if let Some(token) = &cred.session_token {
                    headers.insert(X_AMZ_SECURITY_TOKEN, token.parse()?);
                }

                let string_to_sign = canonical_string(
                    req.method.as_str(),
                    &self.resource(&req),
                    &headers,
                    Some(&expires),
                    &self.options,
                )?;
                debug!("calculated string to sign: {string_to_sign:?}");

                let signature =
                    base64_hmac_sha1(cred.secret_access_key.as_bytes(), string_to_sign.as_bytes());

                req.query_push("AWSAccessKeyId", encode_url_string(&cred.access_key_id));
                req.query_push("Expires", expires);
                req.query_push("Signature", encode_url_string(&signature));
                if let Some(token) = &cred.session_token {
                    req.query_push(X_AMZ_SECURITY_TOKEN, encode_url_string(token));
                }
            }
        }

        req.apply(parts)
    }
}
