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

//! Hash related utils.
//!
//! Every function here builds its own digest or MAC instance, so all of them
//! are safe to call from many threads at once.

use std::fmt;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::str::FromStr;

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use md5::Md5;
use sha1::Sha1;
use sha2::Digest;
use sha2::Sha256;

/// Size of the chunks read by [`hash_stream`] and [`hash_stream_and_rewind`].
const STREAM_BUFFER_SIZE: usize = 8 * 1024;

/// Message digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// MD5, used for `Content-MD5`.
    Md5,
    /// SHA-256, used for SigV4 payload hashes.
    Sha256,
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MD5" => Ok(HashAlgorithm::Md5),
            "SHA-256" | "SHA256" => Ok(HashAlgorithm::Sha256),
            _ => Err(Error::config_invalid(format!(
                "unsupported hash algorithm: {s}"
            ))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "MD5"),
            HashAlgorithm::Sha256 => write!(f, "SHA-256"),
        }
    }
}

/// Keyed hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    /// HmacSHA1, used by the legacy v2 signature.
    HmacSha1,
    /// HmacSHA256, used by SigV4.
    HmacSha256,
}

impl FromStr for HmacAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HmacSHA1" => Ok(HmacAlgorithm::HmacSha1),
            "HmacSHA256" => Ok(HmacAlgorithm::HmacSha256),
            _ => Err(Error::config_invalid(format!(
                "unsupported hmac algorithm: {s}"
            ))),
        }
    }
}

/// Incremental digest over one of the supported algorithms.
enum Hasher {
    Md5(Md5),
    Sha256(Sha256),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Hasher::Md5(Md5::new()),
            HashAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Md5(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Hasher::Md5(h) => h.finalize().to_vec(),
            Hasher::Sha256(h) => h.finalize().to_vec(),
        }
    }
}

/// Digest of the whole buffer.
pub fn hash(content: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    let mut h = Hasher::new(algorithm);
    h.update(content);
    h.finalize()
}

/// Digest of everything the reader yields until EOF.
///
/// The reader is taken by value and dropped before returning, whether the
/// read succeeded or not.
pub fn hash_stream<R: Read>(mut reader: R, algorithm: HashAlgorithm) -> crate::Result<Vec<u8>> {
    digest_to_end(&mut reader, algorithm)
}

/// Digest of everything the reader yields until EOF, after which the reader
/// is moved back to the position it had when this function was called.
///
/// Use this for bodies that must be hashed first and sent afterwards. The
/// rewind is attempted on read failures too.
pub fn hash_stream_and_rewind<R: Read + Seek + ?Sized>(
    reader: &mut R,
    algorithm: HashAlgorithm,
) -> crate::Result<Vec<u8>> {
    let start = reader.stream_position()?;
    let digest = digest_to_end(reader, algorithm);
    let rewound = reader.seek(SeekFrom::Start(start));

    let digest = digest?;
    rewound?;
    Ok(digest)
}

fn digest_to_end<R: Read + ?Sized>(
    reader: &mut R,
    algorithm: HashAlgorithm,
) -> crate::Result<Vec<u8>> {
    let mut h = Hasher::new(algorithm);
    let mut buf = vec![0; STREAM_BUFFER_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        h.update(&buf[..n]);
    }

    Ok(h.finalize())
}

/// Keyed hash of the content.
pub fn hmac(key: &[u8], content: &[u8], algorithm: HmacAlgorithm) -> Vec<u8> {
    match algorithm {
        HmacAlgorithm::HmacSha1 => hmac_sha1(key, content),
        HmacAlgorithm::HmacSha256 => hmac_sha256(key, content),
    }
}

/// Lowercase hex, two digits per byte, no separators.
pub fn hex_encode(content: &[u8]) -> String {
    hex::encode(content)
}

/// Hex decode
pub fn hex_decode(content: &str) -> crate::Result<Vec<u8>> {
    hex::decode(content).map_err(|e| Error::request_invalid("hex decode failed").with_source(e))
}

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::request_invalid("base64 decode failed").with_source(e))
}

/// Hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode(sha256(content))` can reduce
/// extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

/// HMAC with SHA1 hash.
pub fn hmac_sha1(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// Hex encoded HMAC with SHA256 hash.
///
/// Use this function instead of `hex::encode(hmac_sha256(key, content))` can
/// reduce extra copy.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    hex::encode(h.finalize().into_bytes())
}

/// Base64 encoded HMAC with SHA1 hash.
pub fn base64_hmac_sha1(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1>::new_from_slice(key).unwrap();
    h.update(content);

    base64_encode(&h.finalize().into_bytes())
}
