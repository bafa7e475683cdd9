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

use super::{non_empty, DocumentHandler, ElementHandler, Output};
use crate::model::ErrorResponse;

/// Decodes `<ErrorResponse>`, or a bare `<Error>` document.
///
/// CloudFront spells the request id element both `RequestId` and
/// `RequestID`, either fills [`ErrorResponse::request_id`].
#[derive(Debug, Default)]
pub struct ErrorHandler {
    error: ErrorResponse,
    wrapped: bool,
}

impl ElementHandler for ErrorHandler {
    fn name(&self) -> &'static str {
        "Error"
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        if name == "ErrorResponse" {
            self.wrapped = true;
        }
        Ok(Step::Continue)
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Type" => self.error.r#type = text.to_string(),
            "Code" => self.error.code = text.to_string(),
            "Message" => self.error.message = text.to_string(),
            "Detail" => self.error.detail = non_empty(text),
            "RequestId" | "RequestID" => self.error.request_id = text.to_string(),
            "Error" if !self.wrapped => return Ok(Step::Return),
            "ErrorResponse" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::Error(self.error))
    }
}
