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

//! Objects decoded from CloudFront responses.
//!
//! Fields map one to one onto response elements. Scalars missing from a
//! document keep their default value.

use s3sign_core::time::DateTime;

/// A web distribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    /// Distribution id, like `EDFDVBD6EXAMPLE`.
    pub id: String,
    /// `InProgress` or `Deployed`.
    pub status: String,
    /// Last time the configuration changed.
    pub last_modified_time: Option<DateTime>,
    /// Domain name assigned by CloudFront.
    pub domain_name: String,
    /// Invalidation batches still running.
    pub in_progress_invalidation_batches: u32,
    /// Signers with active key pairs.
    pub active_trusted_signers: Option<TrustedSigners>,
    /// Current configuration.
    pub config: DistributionConfig,
}

/// A streaming (RTMP) distribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamingDistribution {
    /// Distribution id.
    pub id: String,
    /// `InProgress` or `Deployed`.
    pub status: String,
    /// Last time the configuration changed.
    pub last_modified_time: Option<DateTime>,
    /// Domain name assigned by CloudFront.
    pub domain_name: String,
    /// Signers with active key pairs.
    pub active_trusted_signers: Option<TrustedSigners>,
    /// Current configuration.
    pub config: StreamingDistributionConfig,
}

/// Configuration of a web distribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionConfig {
    /// Unique value chosen by the caller at creation.
    pub caller_reference: String,
    /// Origins in document order.
    pub origins: Vec<Origin>,
    /// Alternate domain names.
    pub cnames: Vec<String>,
    /// Free form comment.
    pub comment: String,
    /// Whether the distribution accepts requests.
    pub enabled: bool,
    /// Object served for the root url.
    pub default_root_object: Option<String>,
    /// Access logging.
    pub logging: Option<LoggingStatus>,
    /// Accounts allowed to create signed urls.
    pub trusted_signers: Option<TrustedSigners>,
    /// Protocols viewers must use, like `https`.
    pub required_protocols: Vec<String>,
    /// Behavior for paths no other behavior matches.
    pub default_cache_behavior: Option<CacheBehavior>,
    /// Path specific behaviors in precedence order.
    pub cache_behaviors: Vec<CacheBehavior>,
    /// Price class, like `PriceClass_All`.
    pub price_class: Option<String>,
}

/// Configuration of a streaming distribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamingDistributionConfig {
    /// Unique value chosen by the caller at creation.
    pub caller_reference: String,
    /// The S3 origin media is streamed from.
    pub origin: Option<Origin>,
    /// Alternate domain names.
    pub cnames: Vec<String>,
    /// Free form comment.
    pub comment: String,
    /// Whether the distribution accepts requests.
    pub enabled: bool,
    /// Access logging.
    pub logging: Option<LoggingStatus>,
    /// Accounts allowed to create signed urls.
    pub trusted_signers: Option<TrustedSigners>,
    /// Price class, like `PriceClass_All`.
    pub price_class: Option<String>,
}

/// Where a distribution fetches content from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Origin {
    /// Id referenced by cache behaviors. Absent in older documents.
    pub id: Option<String>,
    /// Domain name of the bucket or server.
    pub domain_name: String,
    /// Origin type specific settings.
    pub config: OriginConfig,
}

/// Settings of an [`Origin`].
#[derive(Debug, Clone, PartialEq)]
pub enum OriginConfig {
    /// An S3 bucket.
    S3 {
        /// Identity CloudFront uses to read private content.
        origin_access_identity: Option<String>,
    },
    /// Any HTTP server.
    Custom {
        /// Port for plain HTTP.
        http_port: Option<u16>,
        /// Port for HTTPS.
        https_port: Option<u16>,
        /// `http-only` or `match-viewer`.
        origin_protocol_policy: Option<String>,
    },
}

impl Default for OriginConfig {
    fn default() -> Self {
        OriginConfig::S3 {
            origin_access_identity: None,
        }
    }
}

/// How requests for a path pattern are cached and forwarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheBehavior {
    /// Pattern this behavior applies to. `None` for the default behavior.
    pub path_pattern: Option<String>,
    /// Id of the origin requests go to.
    pub target_origin_id: String,
    /// Whether the query string is forwarded to the origin.
    pub forward_query_string: bool,
    /// Accounts allowed to create signed urls for this behavior.
    pub trusted_signers: Option<TrustedSigners>,
    /// `allow-all` or `https-only`.
    pub viewer_protocol_policy: String,
    /// Minimum time objects stay cached, in seconds.
    pub min_ttl: Option<u64>,
}

/// Access logging settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingStatus {
    /// Whether logging is on. Absent in older documents.
    pub enabled: Option<bool>,
    /// Whether cookies are logged.
    pub include_cookies: Option<bool>,
    /// Bucket receiving logs.
    pub bucket: String,
    /// Prefix of log object names.
    pub prefix: String,
}

/// Trusted signers of a distribution or its active key pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrustedSigners {
    /// Whether signed urls are required. Absent in older documents.
    pub enabled: Option<bool>,
    /// Trusted accounts, `self` for the owning account.
    pub aws_account_numbers: Vec<String>,
    /// Accounts with their active key pairs.
    pub signers: Vec<Signer>,
}

impl TrustedSigners {
    /// Whether the owning account is trusted.
    pub fn is_self_trusted(&self) -> bool {
        self.aws_account_numbers.iter().any(|a| a == "self")
            || self.signers.iter().any(|s| s.aws_account_number == "self")
    }
}

/// An account and its active key pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signer {
    /// Account number, `self` for the owning account.
    pub aws_account_number: String,
    /// Active CloudFront key pair ids.
    pub key_pair_ids: Vec<String>,
}

/// A distribution entry of a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionSummary {
    /// Distribution id.
    pub id: String,
    /// `InProgress` or `Deployed`.
    pub status: String,
    /// Last time the configuration changed.
    pub last_modified_time: Option<DateTime>,
    /// Domain name assigned by CloudFront.
    pub domain_name: String,
    /// Configuration subset carried by the summary.
    pub config: SummaryConfig,
}

/// Configuration carried by a [`DistributionSummary`], by distribution kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryConfig {
    /// A web distribution.
    Standard(DistributionConfig),
    /// A streaming distribution.
    Streaming(StreamingDistributionConfig),
}

impl Default for SummaryConfig {
    fn default() -> Self {
        SummaryConfig::Standard(DistributionConfig::default())
    }
}

impl DistributionSummary {
    /// Whether this summary describes a streaming distribution.
    pub fn is_streaming(&self) -> bool {
        matches!(self.config, SummaryConfig::Streaming(_))
    }
}

/// One page of distributions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionList {
    /// Marker this page starts after.
    pub marker: String,
    /// Marker of the next page when truncated.
    pub next_marker: Option<String>,
    /// Page size asked for.
    pub max_items: u32,
    /// Whether more pages follow.
    pub is_truncated: bool,
    /// Standard and streaming summaries in document order.
    pub summaries: Vec<DistributionSummary>,
}

/// An invalidation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invalidation {
    /// Invalidation id.
    pub id: String,
    /// `InProgress` or `Completed`.
    pub status: String,
    /// When the invalidation was created.
    pub create_time: Option<DateTime>,
    /// What is being invalidated.
    pub batch: InvalidationBatch,
}

/// Paths of an invalidation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvalidationBatch {
    /// Object paths, like `/images/logo.png`.
    pub paths: Vec<String>,
    /// Unique value chosen by the caller.
    pub caller_reference: String,
}

/// An invalidation entry of a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvalidationSummary {
    /// Invalidation id.
    pub id: String,
    /// `InProgress` or `Completed`.
    pub status: String,
    /// When the invalidation was created. Absent in older documents.
    pub create_time: Option<DateTime>,
}

/// One page of invalidations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvalidationList {
    /// Marker this page starts after.
    pub marker: String,
    /// Marker of the next page when truncated.
    pub next_marker: Option<String>,
    /// Page size asked for.
    pub max_items: u32,
    /// Whether more pages follow.
    pub is_truncated: bool,
    /// Invalidations in document order.
    pub summaries: Vec<InvalidationSummary>,
}

/// An origin access identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginAccessIdentity {
    /// Identity id.
    pub id: String,
    /// Canonical user id to grant bucket access to.
    pub s3_canonical_user_id: String,
    /// Current configuration.
    pub config: OriginAccessIdentityConfig,
}

/// Configuration of an origin access identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginAccessIdentityConfig {
    /// Unique value chosen by the caller at creation.
    pub caller_reference: String,
    /// Free form comment.
    pub comment: String,
}

/// An origin access identity entry of a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginAccessIdentitySummary {
    /// Identity id.
    pub id: String,
    /// Canonical user id to grant bucket access to.
    pub s3_canonical_user_id: String,
    /// Free form comment.
    pub comment: String,
}

/// One page of origin access identities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginAccessIdentityList {
    /// Marker this page starts after.
    pub marker: String,
    /// Marker of the next page when truncated.
    pub next_marker: Option<String>,
    /// Page size asked for.
    pub max_items: u32,
    /// Whether more pages follow.
    pub is_truncated: bool,
    /// Identities in document order.
    pub summaries: Vec<OriginAccessIdentitySummary>,
}

/// An error reported by CloudFront.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorResponse {
    /// `Sender` or `Receiver`.
    pub r#type: String,
    /// Error code, like `NoSuchDistribution`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Extra detail, when given.
    pub detail: Option<String>,
    /// Request id, from `RequestId` or `RequestID`.
    pub request_id: String,
}
