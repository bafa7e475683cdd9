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

use s3sign_cloudfront::{
    parse_distribution, parse_distribution_config, parse_invalidation,
    parse_origin_access_identity,
};
use s3sign_core::ErrorKind;
use test_case::test_case;

use super::init_logger;

const INVALIDATION: &str = r#"<Invalidation>
   <Id>IDFDVBD632BHDS5</Id>
   <Status>InProgress</Status>
   <InvalidationBatch>
      <Path>/image1.jpg</Path>
      <CallerReference>my-batch</CallerReference>
   </InvalidationBatch>
</Invalidation>"#;

#[test_case(&INVALIDATION[..40]; "cut inside an element")]
#[test_case(&INVALIDATION[..INVALIDATION.len() - 1]; "cut inside the root end tag")]
#[test_case(""; "empty input")]
#[test_case("<Invalidation><Id>x</Status></Invalidation>"; "mismatched end tag")]
#[test_case("<Invalidation><CreateTime>yesterday</CreateTime></Invalidation>"; "bad timestamp")]
fn test_broken_invalidation_fails(doc: &str) {
    init_logger();

    let err = parse_invalidation(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
}

#[test]
fn test_document_of_another_kind_fails() {
    let err = parse_distribution(INVALIDATION.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);

    let err = parse_origin_access_identity(INVALIDATION.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
}

#[test]
fn test_error_names_the_active_handler() {
    let doc = r#"<Distribution>
   <Id>EDFDVBD6EXAMPLE</Id>
   <DistributionConfig>
      <Logging>
         <Enabled>yes</Enabled>
      </Logging>
   </DistributionConfig>
</Distribution>"#;

    let err = parse_distribution(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
    assert!(err.message().contains("Logging"), "{}", err.message());
}

#[test]
fn test_distribution_without_config_fails() {
    let doc = r#"<Distribution>
   <Id>EDFDVBD6EXAMPLE</Id>
   <Status>Deployed</Status>
</Distribution>"#;

    let err = parse_distribution(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
    assert!(err.message().contains("no configuration"), "{}", err.message());
}

#[test]
fn test_bad_number_fails() {
    let doc = r#"<DistributionConfig>
   <CustomOrigin>
      <DNSName>www.example.com</DNSName>
      <HTTPPort>eighty</HTTPPort>
   </CustomOrigin>
</DistributionConfig>"#;

    let err = parse_distribution_config(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
    assert!(err.message().contains("CustomOrigin"), "{}", err.message());
}
