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

use s3sign_core::time::parse_rfc3339;
use s3sign_core::xml::Step;
use s3sign_core::Result;

use super::{unexpected_child, DocumentHandler, ElementHandler, Output, Page};
use crate::model::{Invalidation, InvalidationList, InvalidationSummary};

/// Decodes `<Invalidation>`, batch included.
#[derive(Debug, Default)]
pub struct InvalidationHandler {
    invalidation: Invalidation,
}

impl ElementHandler for InvalidationHandler {
    fn name(&self) -> &'static str {
        "Invalidation"
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        let inv = &mut self.invalidation;
        match name {
            "Id" => inv.id = text.to_string(),
            "Status" => inv.status = text.to_string(),
            "CreateTime" => inv.create_time = Some(parse_rfc3339(text)?),
            "Path" => inv.batch.paths.push(text.to_string()),
            "CallerReference" => inv.batch.caller_reference = text.to_string(),
            "Invalidation" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::Invalidation(self.invalidation))
    }
}

/// Decodes `<InvalidationSummary>`.
#[derive(Debug, Default)]
pub struct InvalidationSummaryHandler {
    summary: InvalidationSummary,
}

impl ElementHandler for InvalidationSummaryHandler {
    fn name(&self) -> &'static str {
        "InvalidationSummary"
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Id" => self.summary.id = text.to_string(),
            "Status" => self.summary.status = text.to_string(),
            "CreateTime" => self.summary.create_time = Some(parse_rfc3339(text)?),
            "InvalidationSummary" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::InvalidationSummary(self.summary))
    }
}

/// Decodes `<InvalidationList>`.
#[derive(Debug, Default)]
pub struct InvalidationListHandler {
    page: Page,
    summaries: Vec<InvalidationSummary>,
}

impl ElementHandler for InvalidationListHandler {
    fn name(&self) -> &'static str {
        "InvalidationList"
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(match name {
            "InvalidationSummary" => Step::Transfer(DocumentHandler::InvalidationSummary(
                InvalidationSummaryHandler::default(),
            )),
            _ => Step::Continue,
        })
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        if name == "InvalidationList" {
            return Ok(Step::Return);
        }
        self.page.end_element(name, text)?;
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        match output {
            Output::InvalidationSummary(summary) => self.summaries.push(summary),
            other => return Err(unexpected_child(self.name(), &other)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::InvalidationList(InvalidationList {
            marker: self.page.marker,
            next_marker: self.page.next_marker,
            max_items: self.page.max_items,
            is_truncated: self.page.is_truncated,
            summaries: self.summaries,
        }))
    }
}
