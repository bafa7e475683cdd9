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

//! CloudFront support for s3sign.
//!
//! This crate signs CloudFront REST requests and decodes the XML documents
//! CloudFront answers with: distributions, streaming distributions,
//! invalidations, origin access identities and errors.
//!
//! ## Example
//!
//! ```
//! use s3sign_cloudfront::parse_invalidation;
//!
//! # fn main() -> s3sign_core::Result<()> {
//! let body = br#"<?xml version="1.0" encoding="UTF-8"?>
//! <Invalidation xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
//!   <Id>IDFDVBD632BHDS5</Id>
//!   <Status>InProgress</Status>
//!   <CreateTime>2009-11-19T19:37:58Z</CreateTime>
//!   <InvalidationBatch>
//!     <Path>/image1.jpg</Path>
//!     <Path>/image2.jpg</Path>
//!     <CallerReference>20091119193758</CallerReference>
//!   </InvalidationBatch>
//! </Invalidation>"#;
//!
//! let invalidation = parse_invalidation(&body[..])?;
//! assert_eq!(invalidation.status, "InProgress");
//! assert_eq!(invalidation.batch.paths, ["/image1.jpg", "/image2.jpg"]);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod handler;
pub mod model;

mod parse;
pub use parse::*;

mod sign_request;
pub use sign_request::RequestSigner;
