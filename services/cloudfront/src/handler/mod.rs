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

//! Handlers decoding CloudFront response documents.
//!
//! Every handler is a variant of [`DocumentHandler`] and produces one
//! variant of [`Output`]. Composite elements such as origins, cache
//! behaviors, logging settings and trusted signers are decoded by their own
//! handler and handed back to the parent, which picks the field by matching
//! on the output.

mod component;
mod distribution;
mod error;
mod identity;
mod invalidation;

use s3sign_core::xml::{Handle, Step};
use s3sign_core::{Error, Result};

use crate::model::*;
use component::{CacheBehaviorHandler, LoggingHandler, OriginHandler, TrustedSignersHandler};
use distribution::{
    DistributionConfigHandler, DistributionHandler, DistributionListHandler,
    DistributionSummaryHandler,
};
use error::ErrorHandler;
use identity::{
    OriginAccessIdentityConfigHandler, OriginAccessIdentityHandler,
    OriginAccessIdentityListHandler, OriginAccessIdentitySummaryHandler,
};
use invalidation::{InvalidationHandler, InvalidationListHandler, InvalidationSummaryHandler};

/// Value produced by a finished [`DocumentHandler`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// `<Distribution>`
    Distribution(Distribution),
    /// `<StreamingDistribution>`
    StreamingDistribution(StreamingDistribution),
    /// `<DistributionConfig>`
    DistributionConfig(DistributionConfig),
    /// `<StreamingDistributionConfig>`
    StreamingDistributionConfig(StreamingDistributionConfig),
    /// `<Origin>`, `<S3Origin>` or `<CustomOrigin>`
    Origin(Origin),
    /// `<DefaultCacheBehavior>`
    DefaultCacheBehavior(CacheBehavior),
    /// `<CacheBehavior>`
    CacheBehavior(CacheBehavior),
    /// `<Logging>`
    Logging(LoggingStatus),
    /// `<TrustedSigners>`
    TrustedSigners(TrustedSigners),
    /// `<ActiveTrustedSigners>`
    ActiveTrustedSigners(TrustedSigners),
    /// `<DistributionSummary>` or `<StreamingDistributionSummary>`
    DistributionSummary(DistributionSummary),
    /// `<DistributionList>` or `<StreamingDistributionList>`
    DistributionList(DistributionList),
    /// `<Invalidation>`
    Invalidation(Invalidation),
    /// `<InvalidationSummary>`
    InvalidationSummary(InvalidationSummary),
    /// `<InvalidationList>`
    InvalidationList(InvalidationList),
    /// `<CloudFrontOriginAccessIdentity>`
    OriginAccessIdentity(OriginAccessIdentity),
    /// `<CloudFrontOriginAccessIdentityConfig>`
    OriginAccessIdentityConfig(OriginAccessIdentityConfig),
    /// `<CloudFrontOriginAccessIdentitySummary>`
    OriginAccessIdentitySummary(OriginAccessIdentitySummary),
    /// `<CloudFrontOriginAccessIdentityList>`
    OriginAccessIdentityList(OriginAccessIdentityList),
    /// `<ErrorResponse>` or a bare `<Error>`
    Error(ErrorResponse),
}

impl Output {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Output::Distribution(_) => "Distribution",
            Output::StreamingDistribution(_) => "StreamingDistribution",
            Output::DistributionConfig(_) => "DistributionConfig",
            Output::StreamingDistributionConfig(_) => "StreamingDistributionConfig",
            Output::Origin(_) => "Origin",
            Output::DefaultCacheBehavior(_) => "DefaultCacheBehavior",
            Output::CacheBehavior(_) => "CacheBehavior",
            Output::Logging(_) => "Logging",
            Output::TrustedSigners(_) => "TrustedSigners",
            Output::ActiveTrustedSigners(_) => "ActiveTrustedSigners",
            Output::DistributionSummary(_) => "DistributionSummary",
            Output::DistributionList(_) => "DistributionList",
            Output::Invalidation(_) => "Invalidation",
            Output::InvalidationSummary(_) => "InvalidationSummary",
            Output::InvalidationList(_) => "InvalidationList",
            Output::OriginAccessIdentity(_) => "OriginAccessIdentity",
            Output::OriginAccessIdentityConfig(_) => "OriginAccessIdentityConfig",
            Output::OriginAccessIdentitySummary(_) => "OriginAccessIdentitySummary",
            Output::OriginAccessIdentityList(_) => "OriginAccessIdentityList",
            Output::Error(_) => "Error",
        }
    }
}

/// Error for a child output its parent has no field for.
fn unexpected_child(parent: &str, output: &Output) -> Error {
    Error::parse_failed(format!("{parent} can't hold a {}", output.kind()))
}

/// Events as seen by one concrete handler.
trait ElementHandler: Sized {
    fn name(&self) -> &'static str;

    fn start_element(&mut self, _name: &str) -> Result<Step<DocumentHandler>> {
        Ok(Step::Continue)
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>>;

    fn child_finished(&mut self, output: Output) -> Result<()> {
        Err(unexpected_child(self.name(), &output))
    }

    fn finish(self) -> Result<Output>;
}

/// The closed set of CloudFront document handlers.
///
/// Use the constructors to pick the root handler of a document, or the
/// `parse_*` functions of this crate which do it for you.
pub enum DocumentHandler {
    /// A standard or streaming distribution.
    Distribution(DistributionHandler),
    /// A standard or streaming distribution config.
    DistributionConfig(DistributionConfigHandler),
    /// A standard or streaming distribution summary.
    DistributionSummary(DistributionSummaryHandler),
    /// A standard or streaming distribution list.
    DistributionList(DistributionListHandler),
    /// An S3 or custom origin.
    Origin(OriginHandler),
    /// A default or path specific cache behavior.
    CacheBehavior(CacheBehaviorHandler),
    /// Logging settings.
    Logging(LoggingHandler),
    /// Trusted or active trusted signers.
    TrustedSigners(TrustedSignersHandler),
    /// An invalidation.
    Invalidation(InvalidationHandler),
    /// An invalidation summary.
    InvalidationSummary(InvalidationSummaryHandler),
    /// An invalidation list.
    InvalidationList(InvalidationListHandler),
    /// An origin access identity.
    OriginAccessIdentity(OriginAccessIdentityHandler),
    /// An origin access identity config.
    OriginAccessIdentityConfig(OriginAccessIdentityConfigHandler),
    /// An origin access identity summary.
    OriginAccessIdentitySummary(OriginAccessIdentitySummaryHandler),
    /// An origin access identity list.
    OriginAccessIdentityList(OriginAccessIdentityListHandler),
    /// An error document.
    Error(ErrorHandler),
}

macro_rules! dispatch {
    ($handler:expr, $h:ident => $body:expr) => {
        match $handler {
            DocumentHandler::Distribution($h) => $body,
            DocumentHandler::DistributionConfig($h) => $body,
            DocumentHandler::DistributionSummary($h) => $body,
            DocumentHandler::DistributionList($h) => $body,
            DocumentHandler::Origin($h) => $body,
            DocumentHandler::CacheBehavior($h) => $body,
            DocumentHandler::Logging($h) => $body,
            DocumentHandler::TrustedSigners($h) => $body,
            DocumentHandler::Invalidation($h) => $body,
            DocumentHandler::InvalidationSummary($h) => $body,
            DocumentHandler::InvalidationList($h) => $body,
            DocumentHandler::OriginAccessIdentity($h) => $body,
            DocumentHandler::OriginAccessIdentityConfig($h) => $body,
            DocumentHandler::OriginAccessIdentitySummary($h) => $body,
            DocumentHandler::OriginAccessIdentityList($h) => $body,
            DocumentHandler::Error($h) => $body,
        }
    };
}

impl DocumentHandler {
    /// Root handler of `<Distribution>`.
    pub fn distribution() -> Self {
        DocumentHandler::Distribution(DistributionHandler::new(false))
    }

    /// Root handler of `<StreamingDistribution>`.
    pub fn streaming_distribution() -> Self {
        DocumentHandler::Distribution(DistributionHandler::new(true))
    }

    /// Root handler of `<DistributionConfig>`.
    pub fn distribution_config() -> Self {
        DocumentHandler::DistributionConfig(DistributionConfigHandler::new(false))
    }

    /// Root handler of `<StreamingDistributionConfig>`.
    pub fn streaming_distribution_config() -> Self {
        DocumentHandler::DistributionConfig(DistributionConfigHandler::new(true))
    }

    /// Root handler of `<DistributionList>` and `<StreamingDistributionList>`.
    pub fn distribution_list() -> Self {
        DocumentHandler::DistributionList(DistributionListHandler::default())
    }

    /// Root handler of `<Invalidation>`.
    pub fn invalidation() -> Self {
        DocumentHandler::Invalidation(InvalidationHandler::default())
    }

    /// Root handler of `<InvalidationList>`.
    pub fn invalidation_list() -> Self {
        DocumentHandler::InvalidationList(InvalidationListHandler::default())
    }

    /// Root handler of `<CloudFrontOriginAccessIdentity>`.
    pub fn origin_access_identity() -> Self {
        DocumentHandler::OriginAccessIdentity(OriginAccessIdentityHandler::default())
    }

    /// Root handler of `<CloudFrontOriginAccessIdentityConfig>`.
    pub fn origin_access_identity_config() -> Self {
        DocumentHandler::OriginAccessIdentityConfig(OriginAccessIdentityConfigHandler::default())
    }

    /// Root handler of `<CloudFrontOriginAccessIdentityList>`.
    pub fn origin_access_identity_list() -> Self {
        DocumentHandler::OriginAccessIdentityList(OriginAccessIdentityListHandler::default())
    }

    /// Root handler of `<ErrorResponse>` and bare `<Error>` documents.
    pub fn error() -> Self {
        DocumentHandler::Error(ErrorHandler::default())
    }
}

impl Handle for DocumentHandler {
    type Output = Output;

    fn name(&self) -> &'static str {
        dispatch!(self, h => h.name())
    }

    fn start_element(&mut self, name: &str) -> Result<Step<Self>> {
        dispatch!(self, h => h.start_element(name))
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<Self>> {
        dispatch!(self, h => h.end_element(name, text))
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        dispatch!(self, h => h.child_finished(output))
    }

    fn finish(self) -> Result<Output> {
        dispatch!(self, h => h.finish())
    }
}

/// Fields shared by every paginated list document.
#[derive(Debug, Default)]
struct Page {
    marker: String,
    next_marker: Option<String>,
    max_items: u32,
    is_truncated: bool,
}

impl Page {
    fn end_element(&mut self, name: &str, text: &str) -> Result<()> {
        match name {
            "Marker" => self.marker = text.to_string(),
            "NextMarker" => self.next_marker = non_empty(text),
            "MaxItems" => self.max_items = s3sign_core::xml::parse_number(name, text)?,
            "IsTruncated" => self.is_truncated = s3sign_core::xml::parse_bool(name, text)?,
            _ => {}
        }
        Ok(())
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
