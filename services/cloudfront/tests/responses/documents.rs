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

use pretty_assertions::assert_eq;
use s3sign_cloudfront::model::*;
use s3sign_cloudfront::{
    parse_error_response, parse_invalidation, parse_invalidation_list,
    parse_origin_access_identity, parse_origin_access_identity_config,
    parse_origin_access_identity_list,
};
use s3sign_core::Result;
use test_case::test_case;

use super::{init_logger, strings, time};

#[test]
fn test_parse_invalidation() -> Result<()> {
    init_logger();

    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<Invalidation xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Id>IDFDVBD632BHDS5</Id>
   <Status>InProgress</Status>
   <CreateTime>2009-11-19T19:37:58Z</CreateTime>
   <InvalidationBatch>
      <Path>/image1.jpg</Path>
      <Path>/image2.jpg</Path>
      <Path>/videos/movie.flv</Path>
      <CallerReference>my-batch</CallerReference>
   </InvalidationBatch>
</Invalidation>"#;

    assert_eq!(
        parse_invalidation(doc.as_bytes())?,
        Invalidation {
            id: "IDFDVBD632BHDS5".to_string(),
            status: "InProgress".to_string(),
            create_time: time(2009, 11, 19, 19, 37, 58),
            batch: InvalidationBatch {
                paths: strings(&["/image1.jpg", "/image2.jpg", "/videos/movie.flv"]),
                caller_reference: "my-batch".to_string(),
            },
        }
    );
    Ok(())
}

#[test]
fn test_parse_invalidation_list() -> Result<()> {
    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<InvalidationList xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Marker>EGTXBD79EXAMPLE</Marker>
   <NextMarker/>
   <MaxItems>2</MaxItems>
   <IsTruncated>false</IsTruncated>
   <InvalidationSummary>
      <Id>Second_Invalidation_ID</Id>
      <Status>Completed</Status>
   </InvalidationSummary>
   <InvalidationSummary>
      <Id>First_Invalidation_ID</Id>
      <Status>InProgress</Status>
      <CreateTime>2012-05-19T19:37:58.000Z</CreateTime>
   </InvalidationSummary>
</InvalidationList>"#;

    assert_eq!(
        parse_invalidation_list(doc.as_bytes())?,
        InvalidationList {
            marker: "EGTXBD79EXAMPLE".to_string(),
            next_marker: None,
            max_items: 2,
            is_truncated: false,
            summaries: vec![
                InvalidationSummary {
                    id: "Second_Invalidation_ID".to_string(),
                    status: "Completed".to_string(),
                    create_time: None,
                },
                InvalidationSummary {
                    id: "First_Invalidation_ID".to_string(),
                    status: "InProgress".to_string(),
                    create_time: time(2012, 5, 19, 19, 37, 58),
                },
            ],
        }
    );
    Ok(())
}

#[test]
fn test_parse_origin_access_identity() -> Result<()> {
    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<CloudFrontOriginAccessIdentity xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Id>E74FTE3AEXAMPLE</Id>
   <S3CanonicalUserId>cd13868f797c227fbea2830611a26fe0a21ba1b826ab4bed9b7771c9aEXAMPLE</S3CanonicalUserId>
   <CloudFrontOriginAccessIdentityConfig>
      <CallerReference>20120229090000</CallerReference>
      <Comment>Your comments here</Comment>
   </CloudFrontOriginAccessIdentityConfig>
</CloudFrontOriginAccessIdentity>"#;

    assert_eq!(
        parse_origin_access_identity(doc.as_bytes())?,
        OriginAccessIdentity {
            id: "E74FTE3AEXAMPLE".to_string(),
            s3_canonical_user_id:
                "cd13868f797c227fbea2830611a26fe0a21ba1b826ab4bed9b7771c9aEXAMPLE".to_string(),
            config: OriginAccessIdentityConfig {
                caller_reference: "20120229090000".to_string(),
                comment: "Your comments here".to_string(),
            },
        }
    );
    Ok(())
}

#[test]
fn test_parse_origin_access_identity_config() -> Result<()> {
    let doc = r#"<CloudFrontOriginAccessIdentityConfig xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <CallerReference>ref-1</CallerReference>
   <Comment/>
</CloudFrontOriginAccessIdentityConfig>"#;

    assert_eq!(
        parse_origin_access_identity_config(doc.as_bytes())?,
        OriginAccessIdentityConfig {
            caller_reference: "ref-1".to_string(),
            comment: String::new(),
        }
    );
    Ok(())
}

#[test]
fn test_parse_origin_access_identity_list() -> Result<()> {
    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<CloudFrontOriginAccessIdentityList xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Marker>EDFDVBD6EXAMPLE</Marker>
   <NextMarker>EMLARXS9EXAMPLE</NextMarker>
   <MaxItems>2</MaxItems>
   <IsTruncated>true</IsTruncated>
   <CloudFrontOriginAccessIdentitySummary>
      <Id>E74FTE3AEXAMPLE</Id>
      <S3CanonicalUserId>cd13868f797c227fbea2830611a26fe0a21ba1b826ab4bed9b7771c9aEXAMPLE</S3CanonicalUserId>
      <Comment>First origin access identity</Comment>
   </CloudFrontOriginAccessIdentitySummary>
   <CloudFrontOriginAccessIdentitySummary>
      <Id>E58SRM2XEXAMPLE</Id>
      <S3CanonicalUserId>7d843ab5dad8bf5fb5ab2aea0f45cc3bde3d2b3a3b1ed7d0d3ed37a75EXAMPLE</S3CanonicalUserId>
      <Comment>Second origin access identity</Comment>
   </CloudFrontOriginAccessIdentitySummary>
</CloudFrontOriginAccessIdentityList>"#;

    let list = parse_origin_access_identity_list(doc.as_bytes())?;
    assert_eq!(list.marker, "EDFDVBD6EXAMPLE");
    assert_eq!(list.next_marker.as_deref(), Some("EMLARXS9EXAMPLE"));
    assert!(list.is_truncated);
    assert_eq!(
        list.summaries
            .iter()
            .map(|s| (s.id.as_str(), s.comment.as_str()))
            .collect::<Vec<_>>(),
        vec![
            ("E74FTE3AEXAMPLE", "First origin access identity"),
            ("E58SRM2XEXAMPLE", "Second origin access identity"),
        ]
    );
    Ok(())
}

#[test_case(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<ErrorResponse xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Error>
      <Type>Sender</Type>
      <Code>NoSuchDistribution</Code>
      <Message>The specified distribution does not exist.</Message>
   </Error>
   <RequestId>b6eb3f0b-6f4f-11e2-a0c1-example</RequestId>
</ErrorResponse>"#,
    ErrorResponse {
        r#type: "Sender".to_string(),
        code: "NoSuchDistribution".to_string(),
        message: "The specified distribution does not exist.".to_string(),
        detail: None,
        request_id: "b6eb3f0b-6f4f-11e2-a0c1-example".to_string(),
    };
    "wrapped with request id"
)]
#[test_case(
    r#"<Error>
   <Type>Receiver</Type>
   <Code>ServiceUnavailable</Code>
   <Message>Please retry.</Message>
   <Detail>Throttled</Detail>
   <RequestID>4ee3a1c0-example</RequestID>
</Error>"#,
    ErrorResponse {
        r#type: "Receiver".to_string(),
        code: "ServiceUnavailable".to_string(),
        message: "Please retry.".to_string(),
        detail: Some("Throttled".to_string()),
        request_id: "4ee3a1c0-example".to_string(),
    };
    "bare with upper case request id"
)]
fn test_parse_error_response(doc: &str, expected: ErrorResponse) -> Result<()> {
    assert_eq!(parse_error_response(doc.as_bytes())?, expected);
    Ok(())
}
