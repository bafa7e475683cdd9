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

use s3sign_core::time::{parse_rfc3339, DateTime};
use s3sign_core::xml::{parse_bool, parse_number, Step};
use s3sign_core::{Error, Result};

use super::component::{CacheBehaviorHandler, LoggingHandler, OriginHandler, TrustedSignersHandler};
use super::{non_empty, unexpected_child, DocumentHandler, ElementHandler, Output, Page};
use crate::model::*;

/// Configuration elements, shared by config documents and list summaries.
#[derive(Debug, Default)]
struct ConfigFields {
    caller_reference: String,
    origins: Vec<Origin>,
    cnames: Vec<String>,
    comment: String,
    enabled: bool,
    default_root_object: Option<String>,
    logging: Option<LoggingStatus>,
    trusted_signers: Option<TrustedSigners>,
    required_protocols: Vec<String>,
    default_cache_behavior: Option<CacheBehavior>,
    cache_behaviors: Vec<CacheBehavior>,
    price_class: Option<String>,
}

impl ConfigFields {
    fn start_element(&mut self, name: &str) -> Step<DocumentHandler> {
        if let Some(origin) = OriginHandler::for_element(name) {
            return Step::Transfer(DocumentHandler::Origin(origin));
        }

        match name {
            "Logging" => Step::Transfer(DocumentHandler::Logging(LoggingHandler::default())),
            "TrustedSigners" => Step::Transfer(DocumentHandler::TrustedSigners(
                TrustedSignersHandler::new(false),
            )),
            "DefaultCacheBehavior" => {
                Step::Transfer(DocumentHandler::CacheBehavior(CacheBehaviorHandler::new(true)))
            }
            "CacheBehavior" => {
                Step::Transfer(DocumentHandler::CacheBehavior(CacheBehaviorHandler::new(false)))
            }
            _ => Step::Continue,
        }
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<()> {
        match name {
            "CallerReference" => self.caller_reference = text.to_string(),
            "CNAME" | "Cname" => self.cnames.push(text.to_string()),
            "Comment" => self.comment = text.to_string(),
            "Enabled" => self.enabled = parse_bool(name, text)?,
            "DefaultRootObject" => self.default_root_object = non_empty(text),
            "Protocol" => self.required_protocols.push(text.to_string()),
            "PriceClass" => self.price_class = non_empty(text),
            _ => {}
        }
        Ok(())
    }

    fn child_finished(&mut self, parent: &str, output: Output) -> Result<()> {
        match output {
            Output::Origin(origin) => self.origins.push(origin),
            Output::Logging(logging) => self.logging = Some(logging),
            Output::TrustedSigners(signers) => self.trusted_signers = Some(signers),
            Output::DefaultCacheBehavior(b) => self.default_cache_behavior = Some(b),
            Output::CacheBehavior(b) => self.cache_behaviors.push(b),
            other => return Err(unexpected_child(parent, &other)),
        }
        Ok(())
    }

    fn into_standard(self) -> DistributionConfig {
        DistributionConfig {
            caller_reference: self.caller_reference,
            origins: self.origins,
            cnames: self.cnames,
            comment: self.comment,
            enabled: self.enabled,
            default_root_object: self.default_root_object,
            logging: self.logging,
            trusted_signers: self.trusted_signers,
            required_protocols: self.required_protocols,
            default_cache_behavior: self.default_cache_behavior,
            cache_behaviors: self.cache_behaviors,
            price_class: self.price_class,
        }
    }

    fn into_streaming(self) -> StreamingDistributionConfig {
        StreamingDistributionConfig {
            caller_reference: self.caller_reference,
            origin: self.origins.into_iter().next(),
            cnames: self.cnames,
            comment: self.comment,
            enabled: self.enabled,
            logging: self.logging,
            trusted_signers: self.trusted_signers,
            price_class: self.price_class,
        }
    }
}

/// Decodes `<DistributionConfig>` and `<StreamingDistributionConfig>`.
#[derive(Debug)]
pub struct DistributionConfigHandler {
    streaming: bool,
    fields: ConfigFields,
}

impl DistributionConfigHandler {
    pub(super) fn new(streaming: bool) -> Self {
        Self {
            streaming,
            fields: ConfigFields::default(),
        }
    }
}

impl ElementHandler for DistributionConfigHandler {
    fn name(&self) -> &'static str {
        if self.streaming {
            "StreamingDistributionConfig"
        } else {
            "DistributionConfig"
        }
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(self.fields.start_element(name))
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        if name == self.name() {
            return Ok(Step::Return);
        }
        self.fields.end_element(name, text)?;
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        let parent = self.name();
        self.fields.child_finished(parent, output)
    }

    fn finish(self) -> Result<Output> {
        Ok(if self.streaming {
            Output::StreamingDistributionConfig(self.fields.into_streaming())
        } else {
            Output::DistributionConfig(self.fields.into_standard())
        })
    }
}

/// Decodes `<Distribution>` and `<StreamingDistribution>`.
#[derive(Debug)]
pub struct DistributionHandler {
    streaming: bool,
    id: String,
    status: String,
    last_modified_time: Option<DateTime>,
    domain_name: String,
    in_progress_invalidation_batches: u32,
    active_trusted_signers: Option<TrustedSigners>,
    config: Option<DistributionConfig>,
    streaming_config: Option<StreamingDistributionConfig>,
}

impl DistributionHandler {
    pub(super) fn new(streaming: bool) -> Self {
        Self {
            streaming,
            id: String::new(),
            status: String::new(),
            last_modified_time: None,
            domain_name: String::new(),
            in_progress_invalidation_batches: 0,
            active_trusted_signers: None,
            config: None,
            streaming_config: None,
        }
    }
}

impl ElementHandler for DistributionHandler {
    fn name(&self) -> &'static str {
        if self.streaming {
            "StreamingDistribution"
        } else {
            "Distribution"
        }
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(match name {
            "ActiveTrustedSigners" => Step::Transfer(DocumentHandler::TrustedSigners(
                TrustedSignersHandler::new(true),
            )),
            "DistributionConfig" => Step::Transfer(DocumentHandler::DistributionConfig(
                DistributionConfigHandler::new(false),
            )),
            "StreamingDistributionConfig" => Step::Transfer(DocumentHandler::DistributionConfig(
                DistributionConfigHandler::new(true),
            )),
            _ => Step::Continue,
        })
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Id" => self.id = text.to_string(),
            "Status" => self.status = text.to_string(),
            "LastModifiedTime" => self.last_modified_time = Some(parse_rfc3339(text)?),
            "DomainName" => self.domain_name = text.to_string(),
            "InProgressInvalidationBatches" => {
                self.in_progress_invalidation_batches = parse_number(name, text)?
            }
            n if n == self.name() => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        match output {
            Output::ActiveTrustedSigners(signers) => self.active_trusted_signers = Some(signers),
            Output::DistributionConfig(config) => self.config = Some(config),
            Output::StreamingDistributionConfig(config) => self.streaming_config = Some(config),
            other => return Err(unexpected_child(self.name(), &other)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Output> {
        let name = self.name();
        let missing_config = || Error::parse_failed(format!("{name} has no configuration"));

        if self.streaming {
            let config = self.streaming_config.ok_or_else(missing_config)?;
            Ok(Output::StreamingDistribution(StreamingDistribution {
                id: self.id,
                status: self.status,
                last_modified_time: self.last_modified_time,
                domain_name: self.domain_name,
                active_trusted_signers: self.active_trusted_signers,
                config,
            }))
        } else {
            let config = self.config.ok_or_else(missing_config)?;
            Ok(Output::Distribution(Distribution {
                id: self.id,
                status: self.status,
                last_modified_time: self.last_modified_time,
                domain_name: self.domain_name,
                in_progress_invalidation_batches: self.in_progress_invalidation_batches,
                active_trusted_signers: self.active_trusted_signers,
                config,
            }))
        }
    }
}

/// Decodes `<DistributionSummary>` and `<StreamingDistributionSummary>`.
///
/// Summaries inline the configuration elements next to their own.
#[derive(Debug)]
pub struct DistributionSummaryHandler {
    streaming: bool,
    id: String,
    status: String,
    last_modified_time: Option<DateTime>,
    domain_name: String,
    fields: ConfigFields,
}

impl DistributionSummaryHandler {
    fn new(streaming: bool) -> Self {
        Self {
            streaming,
            id: String::new(),
            status: String::new(),
            last_modified_time: None,
            domain_name: String::new(),
            fields: ConfigFields::default(),
        }
    }
}

impl ElementHandler for DistributionSummaryHandler {
    fn name(&self) -> &'static str {
        if self.streaming {
            "StreamingDistributionSummary"
        } else {
            "DistributionSummary"
        }
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(self.fields.start_element(name))
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Id" => self.id = text.to_string(),
            "Status" => self.status = text.to_string(),
            "LastModifiedTime" => self.last_modified_time = Some(parse_rfc3339(text)?),
            "DomainName" => self.domain_name = text.to_string(),
            n if n == self.name() => return Ok(Step::Return),
            _ => self.fields.end_element(name, text)?,
        }
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        let parent = self.name();
        self.fields.child_finished(parent, output)
    }

    fn finish(self) -> Result<Output> {
        let config = if self.streaming {
            SummaryConfig::Streaming(self.fields.into_streaming())
        } else {
            SummaryConfig::Standard(self.fields.into_standard())
        };

        Ok(Output::DistributionSummary(DistributionSummary {
            id: self.id,
            status: self.status,
            last_modified_time: self.last_modified_time,
            domain_name: self.domain_name,
            config,
        }))
    }
}

/// Decodes `<DistributionList>` and `<StreamingDistributionList>`.
///
/// Standard and streaming summaries may be mixed, document order is kept.
#[derive(Debug, Default)]
pub struct DistributionListHandler {
    page: Page,
    summaries: Vec<DistributionSummary>,
}

impl ElementHandler for DistributionListHandler {
    fn name(&self) -> &'static str {
        "DistributionList"
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(match name {
            "DistributionSummary" => Step::Transfer(DocumentHandler::DistributionSummary(
                DistributionSummaryHandler::new(false),
            )),
            "StreamingDistributionSummary" => Step::Transfer(
                DocumentHandler::DistributionSummary(DistributionSummaryHandler::new(true)),
            ),
            _ => Step::Continue,
        })
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "DistributionList" | "StreamingDistributionList" => Ok(Step::Return),
            _ => {
                self.page.end_element(name, text)?;
                Ok(Step::Continue)
            }
        }
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        match output {
            Output::DistributionSummary(summary) => self.summaries.push(summary),
            other => return Err(unexpected_child(self.name(), &other)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::DistributionList(DistributionList {
            marker: self.page.marker,
            next_marker: self.page.next_marker,
            max_items: self.page.max_items,
            is_truncated: self.page.is_truncated,
            summaries: self.summaries,
        }))
    }
}
