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

use s3sign_core::xml::{parse_bool, parse_number, Step};
use s3sign_core::Result;

use super::{non_empty, DocumentHandler, ElementHandler, Output};
use crate::model::{CacheBehavior, LoggingStatus, Origin, OriginConfig, Signer, TrustedSigners};

/// Decodes `<Origin>`, `<S3Origin>` and `<CustomOrigin>`.
///
/// `<Origin>` wraps its type specific settings in `<S3OriginConfig>` or
/// `<CustomOriginConfig>`, the older elements carry them inline.
#[derive(Debug)]
pub struct OriginHandler {
    element: &'static str,
    custom: bool,
    id: Option<String>,
    domain_name: String,
    origin_access_identity: Option<String>,
    http_port: Option<u16>,
    https_port: Option<u16>,
    origin_protocol_policy: Option<String>,
}

impl OriginHandler {
    /// Handler for the origin element that just started, if `name` is one.
    pub(super) fn for_element(name: &str) -> Option<Self> {
        let element = match name {
            "Origin" => "Origin",
            "S3Origin" => "S3Origin",
            "CustomOrigin" => "CustomOrigin",
            _ => return None,
        };

        Some(Self {
            element,
            custom: element == "CustomOrigin",
            id: None,
            domain_name: String::new(),
            origin_access_identity: None,
            http_port: None,
            https_port: None,
            origin_protocol_policy: None,
        })
    }
}

impl ElementHandler for OriginHandler {
    fn name(&self) -> &'static str {
        self.element
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        if name == "CustomOriginConfig" {
            self.custom = true;
        }
        Ok(Step::Continue)
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Id" => self.id = non_empty(text),
            "DomainName" | "DNSName" => self.domain_name = text.to_string(),
            "OriginAccessIdentity" => self.origin_access_identity = non_empty(text),
            "HTTPPort" => self.http_port = Some(parse_number(name, text)?),
            "HTTPSPort" => self.https_port = Some(parse_number(name, text)?),
            "OriginProtocolPolicy" => self.origin_protocol_policy = non_empty(text),
            n if n == self.element => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        let config = if self.custom {
            OriginConfig::Custom {
                http_port: self.http_port,
                https_port: self.https_port,
                origin_protocol_policy: self.origin_protocol_policy,
            }
        } else {
            OriginConfig::S3 {
                origin_access_identity: self.origin_access_identity,
            }
        };

        Ok(Output::Origin(Origin {
            id: self.id,
            domain_name: self.domain_name,
            config,
        }))
    }
}

/// Decodes `<DefaultCacheBehavior>` and `<CacheBehavior>`.
#[derive(Debug)]
pub struct CacheBehaviorHandler {
    default: bool,
    behavior: CacheBehavior,
}

impl CacheBehaviorHandler {
    pub(super) fn new(default: bool) -> Self {
        Self {
            default,
            behavior: CacheBehavior::default(),
        }
    }
}

impl ElementHandler for CacheBehaviorHandler {
    fn name(&self) -> &'static str {
        if self.default {
            "DefaultCacheBehavior"
        } else {
            "CacheBehavior"
        }
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        Ok(match name {
            "TrustedSigners" => Step::Transfer(DocumentHandler::TrustedSigners(
                TrustedSignersHandler::new(false),
            )),
            _ => Step::Continue,
        })
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        if name == self.name() {
            return Ok(Step::Return);
        }

        let b = &mut self.behavior;
        match name {
            "PathPattern" => b.path_pattern = non_empty(text),
            "TargetOriginId" => b.target_origin_id = text.to_string(),
            "QueryString" => b.forward_query_string = parse_bool(name, text)?,
            "ViewerProtocolPolicy" => b.viewer_protocol_policy = text.to_string(),
            "MinTTL" => b.min_ttl = Some(parse_number(name, text)?),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn child_finished(&mut self, output: Output) -> Result<()> {
        match output {
            Output::TrustedSigners(signers) => self.behavior.trusted_signers = Some(signers),
            other => return Err(super::unexpected_child(self.name(), &other)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Output> {
        Ok(if self.default {
            Output::DefaultCacheBehavior(self.behavior)
        } else {
            Output::CacheBehavior(self.behavior)
        })
    }
}

/// Decodes `<Logging>`.
#[derive(Debug, Default)]
pub struct LoggingHandler {
    logging: LoggingStatus,
}

impl ElementHandler for LoggingHandler {
    fn name(&self) -> &'static str {
        "Logging"
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Enabled" => self.logging.enabled = Some(parse_bool(name, text)?),
            "IncludeCookies" => self.logging.include_cookies = Some(parse_bool(name, text)?),
            "Bucket" => self.logging.bucket = text.to_string(),
            "Prefix" => self.logging.prefix = text.to_string(),
            "Logging" => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(Output::Logging(self.logging))
    }
}

/// Decodes `<TrustedSigners>` and `<ActiveTrustedSigners>`.
///
/// An account is either listed on its own, or inside a `<Signer>` together
/// with its key pair ids. `<Self/>` stands for the account `self`.
#[derive(Debug)]
pub struct TrustedSignersHandler {
    active: bool,
    signers: TrustedSigners,
    current: Option<Signer>,
}

impl TrustedSignersHandler {
    pub(super) fn new(active: bool) -> Self {
        Self {
            active,
            signers: TrustedSigners::default(),
            current: None,
        }
    }

    fn account(&mut self, account: &str) {
        match &mut self.current {
            Some(signer) => signer.aws_account_number = account.to_string(),
            None => self.signers.aws_account_numbers.push(account.to_string()),
        }
    }
}

impl ElementHandler for TrustedSignersHandler {
    fn name(&self) -> &'static str {
        if self.active {
            "ActiveTrustedSigners"
        } else {
            "TrustedSigners"
        }
    }

    fn start_element(&mut self, name: &str) -> Result<Step<DocumentHandler>> {
        if name == "Signer" {
            self.current = Some(Signer::default());
        }
        Ok(Step::Continue)
    }

    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<DocumentHandler>> {
        match name {
            "Enabled" => self.signers.enabled = Some(parse_bool(name, text)?),
            "Self" => self.account("self"),
            "AwsAccountNumber" => self.account(text),
            "KeyPairId" => {
                if let Some(signer) = &mut self.current {
                    signer.key_pair_ids.push(text.to_string());
                }
            }
            "Signer" => {
                if let Some(signer) = self.current.take() {
                    self.signers.signers.push(signer);
                }
            }
            n if n == self.name() => return Ok(Step::Return),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn finish(self) -> Result<Output> {
        Ok(if self.active {
            Output::ActiveTrustedSigners(self.signers)
        } else {
            Output::TrustedSigners(self.signers)
        })
    }
}
