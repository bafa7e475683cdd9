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

//! AWS Signature Version 4.
//!
//! - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
//! - [Authenticating Requests (AWS Signature Version 4)](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-authenticating-requests.html)

use std::fmt::Write;
use std::time::Duration;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, DATE, HOST};
use http::request::Parts;
use http::{HeaderMap, HeaderValue};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use s3sign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use s3sign_core::time::{
    format_date, format_iso8601, now, parse_http_date, parse_iso8601, DateTime,
};
use s3sign_core::{
    header_names_sorted, header_values, Context, Error, Result, SignRequest, SigningMethod,
    SigningRequest,
};

use crate::constants::{
    AWS4_HMAC_SHA256, AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, MAX_PRESIGN_EXPIRES_SECS,
    UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::payload::{resolve_payload_hash, Payload};
use crate::region::resolve_region;
use crate::Credential;

/// Build the canonical request.
///
/// ```text
/// <HTTPMethod>\n
/// <CanonicalURI>\n
/// <CanonicalQueryString>\n
/// <CanonicalHeaders>\n
/// <SignedHeaders>\n
/// <HashedPayload>
/// ```
///
/// `query` holds the raw pairs as sent on the wire. Every header in `headers`
/// is signed.
pub fn canonical_request(
    method: &str,
    path: &str,
    query: &[(String, String)],
    headers: &HeaderMap,
    payload_hash: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;

    let path = decode_component(path)?;
    if path.is_empty() {
        writeln!(f, "/")?;
    } else {
        writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    }

    let mut pairs = query
        .iter()
        .map(|(k, v)| -> Result<(String, String)> {
            Ok((canonical_query_component(k)?, canonical_query_component(v)?))
        })
        .collect::<Result<Vec<_>>>()?;
    pairs.sort();
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    writeln!(f, "{query}")?;

    let names = header_names_sorted(headers);
    for name in names.iter() {
        let values = header_values(headers, name)?
            .into_iter()
            .map(str::trim)
            .collect::<Vec<_>>();
        writeln!(f, "{name}:{}", values.join(","))?;
    }
    writeln!(f)?;
    writeln!(f, "{}", names.join(";"))?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}

fn decode_component(s: &str) -> Result<String> {
    Ok(percent_decode_str(s).decode_utf8()?.into_owned())
}

/// Decode a raw query component, `+` being a space, then encode it again.
fn canonical_query_component(s: &str) -> Result<String> {
    let decoded = decode_component(&s.replace('+', " "))?;
    Ok(utf8_percent_encode(&decoded, &AWS_QUERY_ENCODE_SET).to_string())
}

/// Names of all headers, sorted and joined by `;`.
pub fn signed_headers(headers: &HeaderMap) -> String {
    header_names_sorted(headers).join(";")
}

/// Credential scope, like `20130524/us-east-1/s3/aws4_request`.
pub fn credential_scope(time: DateTime, region: &str, service: &str) -> String {
    format!("{}/{region}/{service}/aws4_request", format_date(time))
}

/// Build the string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20130524T000000Z
/// 20130524/us-east-1/s3/aws4_request
/// <hex sha256 of canonical request>
/// ```
pub fn string_to_sign(time: DateTime, scope: &str, canonical_request: &str) -> String {
    format!(
        "{AWS4_HMAC_SHA256}\n{}\n{scope}\n{}",
        format_iso8601(time),
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the signing key for one day, region and service.
pub fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), b"aws4_request")
}

/// Value of the `Authorization` header.
pub fn authorization(
    access_key_id: &str,
    scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{AWS4_HMAC_SHA256} Credential={access_key_id}/{scope},SignedHeaders={signed_headers},Signature={signature}"
    )
}

/// RequestSigner that implements AWS SigV4.
///
/// The region is inferred from the host when not configured, see
/// [`resolve_region`].
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: Option<String>,

    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer for `s3`.
    pub fn new() -> Self {
        Self {
            service: "s3".to_string(),
            region: None,
            time: None,
        }
    }

    /// Set the service name used in the credential scope.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    /// Set the region instead of inferring it from the host.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
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

    /// Sign in headers, hashing `payload` for `x-amz-content-sha256`.
    pub fn sign_with_payload(
        &self,
        parts: &mut Parts,
        credential: Option<&Credential>,
        payload: Payload<'_>,
    ) -> Result<()> {
        self.sign(parts, credential, SigningMethod::Header, payload)
    }

    fn sign(
        &self,
        parts: &mut Parts,
        credential: Option<&Credential>,
        method: SigningMethod,
        payload: Payload<'_>,
    ) -> Result<()> {
        let Some(cred) = credential.filter(|c| !c.is_anonymous()) else {
            debug!("no secret key available, leave request unsigned");
            return Ok(());
        };

        if let SigningMethod::Query(expire) = method {
            if expire.as_secs() < 1 || expire.as_secs() > MAX_PRESIGN_EXPIRES_SECS {
                return Err(Error::config_invalid(format!(
                    "expires_in must be between 1 second and 7 days, got {expire:?}"
                )));
            }
        }

        let mut req = SigningRequest::build(parts)?;

        let now = self.signing_time(&req.headers)?;
        if req.headers.get(HOST).is_none() {
            req.headers.insert(HOST, req.authority.as_str().parse()?);
        }
        let region = resolve_region(self.region.as_deref(), req.authority.host());
        let scope = credential_scope(now, &region, &self.service);
        debug!("calculated scope: {scope}");

        let payload_hash = match method {
            SigningMethod::Header => {
                if !req.headers.contains_key(X_AMZ_DATE) && !req.headers.contains_key(DATE) {
                    req.headers.insert(X_AMZ_DATE, format_iso8601(now).parse()?);
                }

                let payload_hash = resolve_payload_hash(&req.headers, payload)?;
                if !req.headers.contains_key(X_AMZ_CONTENT_SHA_256) {
                    req.headers
                        .insert(X_AMZ_CONTENT_SHA_256, payload_hash.parse()?);
                }

                if let Some(token) = &cred.session_token {
                    let mut value: HeaderValue = token.parse()?;
                    value.set_sensitive(true);
                    req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
                }

                payload_hash
            }
            SigningMethod::Query(expire) => {
                let credential = format!("{}/{scope}", cred.access_key_id);
                let signed = signed_headers(&req.headers);

                req.query_push("X-Amz-Algorithm", AWS4_HMAC_SHA256);
                req.query_push("X-Amz-Credential", encode_query(&credential));
                req.query_push("X-Amz-Date", format_iso8601(now));
                req.query_push("X-Amz-Expires", expire.as_secs().to_string());
                req.query_push("X-Amz-SignedHeaders", encode_query(&signed));
                if let Some(token) = &cred.session_token {
                    req.query_push("X-Amz-Security-Token", encode_query(token));
                }

                UNSIGNED_PAYLOAD.to_string()
            }
        };

        let creq = canonical_request(
            req.method.as_str(),
            &req.path,
            &req.query,
            &req.headers,
            &payload_hash,
        )?;
        debug!("calculated canonical request: {creq}");

        let string_to_sign = string_to_sign(now, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, now, &region, &self.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        match method {
            SigningMethod::Header => {
                let mut value: HeaderValue = authorization(
                    &cred.access_key_id,
                    &scope,
                    &signed_headers(&req.headers),
                    &signature,
                )
                .parse()?;
                value.set_sensitive(true);
                req.headers.insert(AUTHORIZATION, value);
            }
            SigningMethod::Query(_) => req.query_push("X-Amz-Signature", signature),
        }

        req.apply(parts)
    }

    /// `x-amz-date`, else `Date`, else the clock.
    fn signing_time(&self, headers: &HeaderMap) -> Result<DateTime> {
        if let Some(v) = headers.get(X_AMZ_DATE) {
            return parse_iso8601(v.to_str()?);
        }
        if let Some(v) = headers.get(DATE) {
            return parse_http_date(v.to_str()?);
        }
        Ok(self.time.unwrap_or_else(now))
    }
}

fn encode_query(s: &str) -> String {
    utf8_percent_encode(s, &AWS_QUERY_ENCODE_SET).to_string()
}

/// Body a request carries when only its parts are at hand.
fn payload_from_headers(headers: &HeaderMap) -> Payload<'static> {
    let has_body = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0);

    if has_body {
        Payload::Streaming
    } else {
        Payload::Empty
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
        let payload = payload_from_headers(&parts.headers);
        self.sign(
            parts,
            credential,
            SigningMethod::from_expires_in(expires_in),
            payload,
        )
    }
}
