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

//! Entry points decoding one CloudFront response document each.
//!
//! Every function runs the matching root handler over `reader` and fails
//! with [`s3sign_core::ErrorKind::ParseFailed`] when the document is not
//! well formed or not of the expected kind.

use std::io::BufRead;

use s3sign_core::{xml, Error, Result};

use crate::handler::{DocumentHandler, Output};
use crate::model::*;

macro_rules! parse_document {
    ($(#[$doc:meta])* $fn_name:ident, $root:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $fn_name<R: BufRead>(reader: R) -> Result<$ty> {
            match xml::parse(reader, DocumentHandler::$root())? {
                Output::$variant(v) => Ok(v),
                other => Err(wrong_document(stringify!($variant), &other)),
            }
        }
    };
}

fn wrong_document(expected: &str, output: &Output) -> Error {
    Error::parse_failed(format!("expected a {expected} document, got {}", output.kind()))
}

parse_document!(
    /// Decode a `<Distribution>` document.
    parse_distribution,
    distribution,
    Distribution,
    Distribution
);
parse_document!(
    /// Decode a `<StreamingDistribution>` document.
    parse_streaming_distribution,
    streaming_distribution,
    StreamingDistribution,
    StreamingDistribution
);
parse_document!(
    /// Decode a `<DistributionConfig>` document.
    parse_distribution_config,
    distribution_config,
    DistributionConfig,
    DistributionConfig
);
parse_document!(
    /// Decode a `<StreamingDistributionConfig>` document.
    parse_streaming_distribution_config,
    streaming_distribution_config,
    StreamingDistributionConfig,
    StreamingDistributionConfig
);
parse_document!(
    /// Decode a `<DistributionList>` or `<StreamingDistributionList>` document.
    ///
    /// Standard and streaming summaries keep their document order.
    parse_distribution_list,
    distribution_list,
    DistributionList,
    DistributionList
);
parse_document!(
    /// Decode an `<Invalidation>` document.
    parse_invalidation,
    invalidation,
    Invalidation,
    Invalidation
);
parse_document!(
    /// Decode an `<InvalidationList>` document.
    parse_invalidation_list,
    invalidation_list,
    InvalidationList,
    InvalidationList
);
parse_document!(
    /// Decode a `<CloudFrontOriginAccessIdentity>` document.
    parse_origin_access_identity,
    origin_access_identity,
    OriginAccessIdentity,
    OriginAccessIdentity
);
parse_document!(
    /// Decode a `<CloudFrontOriginAccessIdentityConfig>` document.
    parse_origin_access_identity_config,
    origin_access_identity_config,
    OriginAccessIdentityConfig,
    OriginAccessIdentityConfig
);
parse_document!(
    /// Decode a `<CloudFrontOriginAccessIdentityList>` document.
    parse_origin_access_identity_list,
    origin_access_identity_list,
    OriginAccessIdentityList,
    OriginAccessIdentityList
);
parse_document!(
    /// Decode an `<ErrorResponse>` or bare `<Error>` document.
    parse_error_response,
    error,
    Error,
    ErrorResponse
);
