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

//! Payload hashing for SigV4.

use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};

use http::HeaderMap;
use s3sign_core::hash::{hash_stream_and_rewind, hex_encode, hex_sha256, HashAlgorithm};
use s3sign_core::{Error, Result};

use crate::constants::{EMPTY_STRING_SHA256, UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256};

/// A body that can be read and rewound.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Body of the request being signed.
pub enum Payload<'a> {
    /// No body.
    Empty,
    /// A body held in memory.
    Bytes(&'a [u8]),
    /// A repeatable body, hashed then rewound for the actual send.
    Seekable(&'a mut dyn ReadSeek),
    /// Skip body signing.
    Unsigned,
    /// A body that can only be read once.
    Streaming,
}

impl Debug for Payload<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Empty => f.write_str("Empty"),
            Payload::Bytes(bs) => write!(f, "Bytes({} bytes)", bs.len()),
            Payload::Seekable(_) => f.write_str("Seekable"),
            Payload::Unsigned => f.write_str("Unsigned"),
            Payload::Streaming => f.write_str("Streaming"),
        }
    }
}

/// Work out the value of `x-amz-content-sha256`.
///
/// A hash already present in the headers is used verbatim. Otherwise the
/// payload is hashed. A streaming payload can't be hashed without consuming
/// it, so it fails unless the caller set the header.
pub fn resolve_payload_hash(headers: &HeaderMap, payload: Payload<'_>) -> Result<String> {
    if let Some(v) = headers.get(X_AMZ_CONTENT_SHA_256) {
        return Ok(v.to_str()?.to_string());
    }

    match payload {
        Payload::Empty => Ok(EMPTY_STRING_SHA256.to_string()),
        Payload::Bytes(bs) => Ok(hex_sha256(bs)),
        Payload::Seekable(reader) => Ok(hex_encode(&hash_stream_and_rewind(
            reader,
            HashAlgorithm::Sha256,
        )?)),
        Payload::Unsigned => Ok(UNSIGNED_PAYLOAD.to_string()),
        Payload::Streaming => Err(Error::config_invalid(format!(
            "streaming payload can't be hashed, {X_AMZ_CONTENT_SHA_256} must be set"
        ))),
    }
}
