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

//! Signing for Amazon S3 and S3 compatible services.
//!
//! Two signers implement [`s3sign_core::SignRequest`]:
//!
//! - [`sign_request::v2::RequestSigner`]: `AWS <key>:<signature>` with HMAC-SHA1.
//! - [`sign_request::v4::RequestSigner`]: AWS Signature Version 4.
//!
//! ## Example
//!
//! ```no_run
//! use s3sign_aws::sign_request::v4::RequestSigner;
//! use s3sign_aws::{Config, DefaultCredentialProvider};
//! use s3sign_core::{Context, OsEnv, Result, Signer};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Arc::new(Config::new().from_env(&ctx));
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(config), RequestSigner::new());
//!
//! let mut parts = http::Request::get("https://examplebucket.s3.amazonaws.com/test.txt")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

pub mod constants;
pub mod payload;
pub mod region;
pub mod sign_request;
