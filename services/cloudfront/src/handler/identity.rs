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

use s3sign_core::xml::Step;
use s3sign_core::Result;

use super::{unexpected_child, DocumentHandler, ElementHandler, Output, Page};
use crate::model::{
    OriginAccessIdentity, OriginAccessIdentityConfig, OriginAccessIdentityList,
    OriginAccessIdentitySummary,
};

/// Decodes `<CloudFrontOriginAccessIdentity>`.
#[derive(Debug, Default)]
pub struct OriginAccessIdentityHandler {
    identity: OriginAccessIdentity,
}

impl ElementHandler for OriginAccessIdentityHandler {
    fn name(&self) -> &'static str {
        "CloudFrontOriginAccessIdentity"
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(match name {
            "CloudFrontOriginAccessIdentityConfig" => Step::Transfer(
                DocumentHandler::OriginAccessIdentityConfig(
                    OriginAccessIdentityConfigHandler::default(),
                ),
            ),
            _ => Step::Continue,
        })
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Id" => self.identity.id = text.to_string(),
            "S3CanonicalUserId" => self.identity.s3_canonical_user_id = text.to_string(),
            "CloudFrontOriginAccessIdentity" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        match output {
            Output::OriginAccessIdentityConfig(config) => self.identity.config = config,
            other => return Err(unexpected_child(self.name(), &other)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::OriginAccessIdentity(self.identity))
    }
}

/// Decodes `<CloudFrontOriginAccessIdentityConfig>`.
#[derive(Debug, Default)]
pub struct OriginAccessIdentityConfigHandler {
    config: OriginAccessIdentityConfig,
}

impl ElementHandler for OriginAccessIdentityConfigHandler {
    fn name(&self) -> &'static str {
        "CloudFrontOriginAccessIdentityConfig"
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "CallerReference" => self.config.caller_reference = text.to_string(),
            "Comment" => self.config.comment = text.to_string(),
            "CloudFrontOriginAccessIdentityConfig" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::OriginAccessIdentityConfig(self.config))
    }
}

/// Decodes `<CloudFrontOriginAccessIdentitySummary>`.
#[derive(Debug, Default)]
pub struct OriginAccessIdentitySummaryHandler {
    summary: OriginAccessIdentitySummary,
}

impl ElementHandler for OriginAccessIdentitySummaryHandler {
    fn name(&self) -> &'static str {
        "CloudFrontOriginAccessIdentitySummary"
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Id" => self.summary.id = text.to_string(),
            "S3CanonicalUserId" => self.summary.s3_canonical_user_id = text.to_string(),
            "Comment" => self.summary.comment = text.to_string(),
            "CloudFrontOriginAccessIdentitySummary" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::OriginAccessIdentitySummary(self.summary))
    }
}

/// Decodes `<CloudFrontOriginAccessIdentityList>`.
#[derive(Debug, Default)]
pub struct OriginAccessIdentityListHandler {
    page: Page,
    summaries: Vec<OriginAccessIdentitySummary>,
}

impl ElementHandler for OriginAccessIdentityListHandler {
    fn name(&self) -> &'static str {
        "CloudFrontOriginAccessIdentityList"
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(match name {
            "CloudFrontOriginAccessIdentitySummary" => Step::Transfer(
                DocumentHandler::OriginAccessIdentitySummary(
                    OriginAccessIdentitySummaryHandler::default(),
                ),
            ),
            _ => Step::Continue,
        })
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        if name == "CloudFrontOriginAccessIdentityList" {
            return Ok(Step::Return);
        }
        self.page.end_element(name, text)?;
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        match output {
            Output::OriginAccessIdentitySummary(summary) => self.summaries.push(summary),
            other => return Err(unexpected_child(self.name(), &other)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::OriginAccessIdentityList(OriginAccessIdentityList {
            marker: self.page.marker,
            next_marker: self.page.next_marker,
            max_items: self.page.max_items,
            is_truncated: self.page.is_truncated,
            summaries: self.summaries,
        }))
    }
}
