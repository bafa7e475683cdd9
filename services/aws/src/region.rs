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

//! Mapping between S3 endpoint host names and regions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::DEFAULT_REGION;

/// Matches every S3 endpoint shape, with an optional bucket in front.
///
/// - `s3.amazonaws.com`
/// - `s3-<region>.amazonaws.com`
/// - `s3.<region>.amazonaws.com`
/// - `s3.dualstack.<region>.amazonaws.com`
/// - `s3-external-1.amazonaws.com`
/// - all of the above under `.amazonaws.com.cn`
///
/// A region is a two letter area, an optional partition (`gov`, `iso`,
/// `isob`), a direction and a number. Other labels after `s3`, such as
/// `accelerate` or `website-<region>`, are not region endpoints.
static S3_ENDPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<bucket>.+)\.)?s3(?:-external-1|[.-](?:dualstack\.)?(?P<region>[a-z]{2}(?:-gov|-iso[a-z]?)?-[a-z]+-\d+))?\.amazonaws\.com(?:\.cn)?$",
    )
    .expect("endpoint pattern must be valid")
});

/// Split an optional `:port` suffix off a host.
fn split_port(host: &str) -> (&str, Option<&str>) {
    match host.rsplit_once(':') {
        Some((h, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (h, Some(port))
        }
        _ => (host, None),
    }
}

/// Detect the region addressed by an S3 host name.
///
/// The global endpoint and `s3-external-1` don't name a region and yield
/// `None`, like any host that isn't an S3 endpoint at all. Callers fall back
/// to [`DEFAULT_REGION`] in that case.
///
/// ```
/// use s3sign_aws::region::region_from_host;
///
/// assert_eq!(region_from_host("s3.amazonaws.com"), None);
/// assert_eq!(
///     region_from_host("bucket.s3-eu-west-1.amazonaws.com").as_deref(),
///     Some("eu-west-1")
/// );
/// ```
pub fn region_from_host(host: &str) -> Option<String> {
    let (host, _) = split_port(host);
    let host = host.to_ascii_lowercase();

    let caps = S3_ENDPOINT.captures(&host)?;
    caps.name("region").map(|region| region.as_str().to_string())
}

/// Region to sign for: the configured one, else the one the host names,
/// else [`DEFAULT_REGION`].
pub fn resolve_region(configured: Option<&str>, host: &str) -> String {
    if let Some(region) = configured {
        return region.to_string();
    }

    match region_from_host(host) {
        Some(region) => {
            log::debug!("inferred region {region} from host {host}");
            region
        }
        None => DEFAULT_REGION.to_string(),
    }
}

/// Rewrite an S3 host so it points at the endpoint of `region`.
///
/// Bucket labels in front of the endpoint are kept. `us-east-1` maps to the
/// global `s3.amazonaws.com`, China regions to `s3.<region>.amazonaws.com.cn`
/// and every other region to `s3-<region>.amazonaws.com`. Hosts that are not
/// S3 endpoints come back unchanged.
pub fn correct_host_for_region(host: &str, region: &str) -> String {
    let (name, port) = split_port(host);
    let lowered = name.to_ascii_lowercase();

    let Some(caps) = S3_ENDPOINT.captures(&lowered) else {
        return host.to_string();
    };

    let endpoint = if region == DEFAULT_REGION {
        "s3.amazonaws.com".to_string()
    } else if region.starts_with("cn-") {
        format!("s3.{region}.amazonaws.com.cn")
    } else {
        format!("s3-{region}.amazonaws.com")
    };

    let mut corrected = match caps.name("bucket") {
        Some(bucket) => format!("{}.{endpoint}", bucket.as_str()),
        None => endpoint,
    };
    if let Some(port) = port {
        corrected.push(':');
        corrected.push_str(port);
    }
    corrected
}
