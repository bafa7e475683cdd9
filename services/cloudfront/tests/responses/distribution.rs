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
    parse_distribution, parse_distribution_config, parse_distribution_list,
    parse_streaming_distribution,
};
use s3sign_core::Result;

use super::{init_logger, strings, time};

const DISTRIBUTION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Distribution xmlns="http://cloudfront.amazonaws.com/doc/2012-05-05/">
   <Id>EDFDVBD6EXAMPLE</Id>
   <Status>Deployed</Status>
   <LastModifiedTime>2012-05-19T19:37:58Z</LastModifiedTime>
   <InProgressInvalidationBatches>1</InProgressInvalidationBatches>
   <DomainName>d111111abcdef8.cloudfront.net</DomainName>
   <ActiveTrustedSigners>
      <Enabled>true</Enabled>
      <Quantity>2</Quantity>
      <Items>
         <Signer>
            <AwsAccountNumber>self</AwsAccountNumber>
            <KeyPairIds>
               <Quantity>1</Quantity>
               <Items>
                  <KeyPairId>APKA9ONS7QCOWEXAMPLE</KeyPairId>
               </Items>
            </KeyPairIds>
         </Signer>
         <Signer>
            <AwsAccountNumber>111122223333</AwsAccountNumber>
            <KeyPairIds>
               <Quantity>2</Quantity>
               <Items>
                  <KeyPairId>APKAI72T5DYBXEXAMPLE</KeyPairId>
                  <KeyPairId>APKAU72D8DYNXEXAMPLE</KeyPairId>
               </Items>
            </KeyPairIds>
         </Signer>
      </Items>
   </ActiveTrustedSigners>
   <DistributionConfig>
      <CallerReference>example.com2012-04-11-5:09pm</CallerReference>
      <Aliases>
         <Quantity>1</Quantity>
         <Items>
            <CNAME>www.example.com</CNAME>
         </Items>
      </Aliases>
      <DefaultRootObject>index.html</DefaultRootObject>
      <Origins>
         <Quantity>2</Quantity>
         <Items>
            <Origin>
               <Id>example-Amazon S3-origin</Id>
               <DomainName>myawsbucket.s3.amazonaws.com</DomainName>
               <S3OriginConfig>
                  <OriginAccessIdentity>origin-access-identity/cloudfront/E74FTE3AEXAMPLE</OriginAccessIdentity>
               </S3OriginConfig>
            </Origin>
            <Origin>
               <Id>example-custom-origin</Id>
               <DomainName>example.com</DomainName>
               <CustomOriginConfig>
                  <HTTPPort>80</HTTPPort>
                  <HTTPSPort>443</HTTPSPort>
                  <OriginProtocolPolicy>match-viewer</OriginProtocolPolicy>
               </CustomOriginConfig>
            </Origin>
         </Items>
      </Origins>
      <DefaultCacheBehavior>
         <TargetOriginId>example-Amazon S3-origin</TargetOriginId>
         <ForwardedValues>
            <QueryString>true</QueryString>
         </ForwardedValues>
         <TrustedSigners>
            <Enabled>true</Enabled>
            <Quantity>3</Quantity>
            <Items>
               <AwsAccountNumber>self</AwsAccountNumber>
               <AwsAccountNumber>111122223333</AwsAccountNumber>
               <AwsAccountNumber>444455556666</AwsAccountNumber>
            </Items>
         </TrustedSigners>
         <ViewerProtocolPolicy>https-only</ViewerProtocolPolicy>
         <MinTTL>0</MinTTL>
      </DefaultCacheBehavior>
      <CacheBehaviors>
         <Quantity>1</Quantity>
         <Items>
            <CacheBehavior>
               <PathPattern>*.jpg</PathPattern>
               <TargetOriginId>example-custom-origin</TargetOriginId>
               <ForwardedValues>
                  <QueryString>false</QueryString>
               </ForwardedValues>
               <TrustedSigners>
                  <Enabled>false</Enabled>
                  <Quantity>0</Quantity>
               </TrustedSigners>
               <ViewerProtocolPolicy>allow-all</ViewerProtocolPolicy>
               <MinTTL>86400</MinTTL>
            </CacheBehavior>
         </Items>
      </CacheBehaviors>
      <Comment>example comment</Comment>
      <Logging>
         <Enabled>true</Enabled>
         <IncludeCookies>true</IncludeCookies>
         <Bucket>myawslogbucket.s3.amazonaws.com</Bucket>
         <Prefix>example.com.</Prefix>
      </Logging>
      <Restrictions>
         <GeoRestriction>
            <RestrictionType>none</RestrictionType>
            <Quantity>0</Quantity>
         </GeoRestriction>
      </Restrictions>
      <HttpVersion>http2</HttpVersion>
      <PriceClass>PriceClass_All</PriceClass>
      <Enabled>true</Enabled>
   </DistributionConfig>
</Distribution>"#;

#[test]
fn test_parse_distribution() -> Result<()> {
    init_logger();

    let distribution = parse_distribution(DISTRIBUTION.as_bytes())?;

    let expected = Distribution {
        id: "EDFDVBD6EXAMPLE".to_string(),
        status: "Deployed".to_string(),
        last_modified_time: time(2012, 5, 19, 19, 37, 58),
        domain_name: "d111111abcdef8.cloudfront.net".to_string(),
        in_progress_invalidation_batches: 1,
        active_trusted_signers: Some(TrustedSigners {
            enabled: Some(true),
            aws_account_numbers: vec![],
            signers: vec![
                Signer {
                    aws_account_number: "self".to_string(),
                    key_pair_ids: strings(&["APKA9ONS7QCOWEXAMPLE"]),
                },
                Signer {
                    aws_account_number: "111122223333".to_string(),
                    key_pair_ids: strings(&["APKAI72T5DYBXEXAMPLE", "APKAU72D8DYNXEXAMPLE"]),
                },
            ],
        }),
        config: DistributionConfig {
            caller_reference: "example.com2012-04-11-5:09pm".to_string(),
            origins: vec![
                Origin {
                    id: Some("example-Amazon S3-origin".to_string()),
                    domain_name: "myawsbucket.s3.amazonaws.com".to_string(),
                    config: OriginConfig::S3 {
                        origin_access_identity: Some(
                            "origin-access-identity/cloudfront/E74FTE3AEXAMPLE".to_string(),
                        ),
                    },
                },
                Origin {
                    id: Some("example-custom-origin".to_string()),
                    domain_name: "example.com".to_string(),
                    config: OriginConfig::Custom {
                        http_port: Some(80),
                        https_port: Some(443),
                        origin_protocol_policy: Some("match-viewer".to_string()),
                    },
                },
            ],
            cnames: strings(&["www.example.com"]),
            comment: "example comment".to_string(),
            enabled: true,
            default_root_object: Some("index.html".to_string()),
            logging: Some(LoggingStatus {
                enabled: Some(true),
                include_cookies: Some(true),
                bucket: "myawslogbucket.s3.amazonaws.com".to_string(),
                prefix: "example.com.".to_string(),
            }),
            trusted_signers: None,
            required_protocols: vec![],
            default_cache_behavior: Some(CacheBehavior {
                path_pattern: None,
                target_origin_id: "example-Amazon S3-origin".to_string(),
                forward_query_string: true,
                trusted_signers: Some(TrustedSigners {
                    enabled: Some(true),
                    aws_account_numbers: strings(&["self", "111122223333", "444455556666"]),
                    signers: vec![],
                }),
                viewer_protocol_policy: "https-only".to_string(),
                min_ttl: Some(0),
            }),
            cache_behaviors: vec![CacheBehavior {
                path_pattern: Some("*.jpg".to_string()),
                target_origin_id: "example-custom-origin".to_string(),
                forward_query_string: false,
                trusted_signers: Some(TrustedSigners {
                    enabled: Some(false),
                    aws_account_numbers: vec![],
                    signers: vec![],
                }),
                viewer_protocol_policy: "allow-all".to_string(),
                min_ttl: Some(86400),
            }],
            price_class: Some("PriceClass_All".to_string()),
        },
    };
    assert_eq!(distribution, expected);

    let default_behavior = distribution.config.default_cache_behavior.as_ref().unwrap();
    assert!(default_behavior.trusted_signers.as_ref().unwrap().is_self_trusted());
    Ok(())
}

#[test]
fn test_parse_streaming_distribution() -> Result<()> {
    init_logger();

    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<StreamingDistribution xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Id>EGTXBD79EXAMPLE</Id>
   <Status>Deployed</Status>
   <LastModifiedTime>2009-11-19T19:37:58Z</LastModifiedTime>
   <DomainName>s5c39gqb8ow64r.cloudfront.net</DomainName>
   <ActiveTrustedSigners>
      <Signer>
         <Self/>
         <KeyPairId>APKA9ONS7QCOWEXAMPLE</KeyPairId>
      </Signer>
      <Signer>
         <AwsAccountNumber>111122223333</AwsAccountNumber>
         <KeyPairId>APKAI72T5DYBXEXAMPLE</KeyPairId>
      </Signer>
   </ActiveTrustedSigners>
   <StreamingDistributionConfig>
      <S3Origin>
         <DNSName>mystreamingbucket.s3.amazonaws.com</DNSName>
         <OriginAccessIdentity>origin-access-identity/cloudfront/E127EXAMPLE51Z</OriginAccessIdentity>
      </S3Origin>
      <CallerReference>20091130090000</CallerReference>
      <CNAME>beagles.com</CNAME>
      <Comment>This is a comment</Comment>
      <Enabled>true</Enabled>
      <Logging>
         <Bucket>mylogs.s3.amazonaws.com</Bucket>
         <Prefix>myprefix/</Prefix>
      </Logging>
      <TrustedSigners>
         <Self/>
         <AwsAccountNumber>111122223333</AwsAccountNumber>
      </TrustedSigners>
   </StreamingDistributionConfig>
</StreamingDistribution>"#;

    let distribution = parse_streaming_distribution(doc.as_bytes())?;

    let expected = StreamingDistribution {
        id: "EGTXBD79EXAMPLE".to_string(),
        status: "Deployed".to_string(),
        last_modified_time: time(2009, 11, 19, 19, 37, 58),
        domain_name: "s5c39gqb8ow64r.cloudfront.net".to_string(),
        active_trusted_signers: Some(TrustedSigners {
            enabled: None,
            aws_account_numbers: vec![],
            signers: vec![
                Signer {
                    aws_account_number: "self".to_string(),
                    key_pair_ids: strings(&["APKA9ONS7QCOWEXAMPLE"]),
                },
                Signer {
                    aws_account_number: "111122223333".to_string(),
                    key_pair_ids: strings(&["APKAI72T5DYBXEXAMPLE"]),
                },
            ],
        }),
        config: StreamingDistributionConfig {
            caller_reference: "20091130090000".to_string(),
            origin: Some(Origin {
                id: None,
                domain_name: "mystreamingbucket.s3.amazonaws.com".to_string(),
                config: OriginConfig::S3 {
                    origin_access_identity: Some(
                        "origin-access-identity/cloudfront/E127EXAMPLE51Z".to_string(),
                    ),
                },
            }),
            cnames: strings(&["beagles.com"]),
            comment: "This is a comment".to_string(),
            enabled: true,
            logging: Some(LoggingStatus {
                enabled: None,
                include_cookies: None,
                bucket: "mylogs.s3.amazonaws.com".to_string(),
                prefix: "myprefix/".to_string(),
            }),
            trusted_signers: Some(TrustedSigners {
                enabled: None,
                aws_account_numbers: strings(&["self", "111122223333"]),
                signers: vec![],
            }),
            price_class: None,
        },
    };
    assert_eq!(distribution, expected);
    Ok(())
}

#[test]
fn test_parse_distribution_config() -> Result<()> {
    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<DistributionConfig xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <CustomOrigin>
      <DNSName>www.example.com</DNSName>
      <HTTPPort>8080</HTTPPort>
      <OriginProtocolPolicy>http-only</OriginProtocolPolicy>
   </CustomOrigin>
   <CallerReference>20120229090000</CallerReference>
   <CNAME>www.example.com</CNAME>
   <CNAME>product.example.com</CNAME>
   <Comment>Tom &amp; Jerry&apos;s <![CDATA[<site>]]></Comment>
   <Enabled>false</Enabled>
   <DefaultRootObject/>
   <RequiredProtocols>
      <Protocol>https</Protocol>
   </RequiredProtocols>
</DistributionConfig>"#;

    let config = parse_distribution_config(doc.as_bytes())?;

    let expected = DistributionConfig {
        caller_reference: "20120229090000".to_string(),
        origins: vec![Origin {
            id: None,
            domain_name: "www.example.com".to_string(),
            config: OriginConfig::Custom {
                http_port: Some(8080),
                https_port: None,
                origin_protocol_policy: Some("http-only".to_string()),
            },
        }],
        cnames: strings(&["www.example.com", "product.example.com"]),
        comment: "Tom & Jerry's <site>".to_string(),
        enabled: false,
        required_protocols: strings(&["https"]),
        ..Default::default()
    };
    assert_eq!(config, expected);
    Ok(())
}

#[test]
fn test_parse_mixed_distribution_list() -> Result<()> {
    init_logger();

    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<DistributionList xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Marker>RMPARXS293KSTG7</Marker>
   <NextMarker>EMLARXS9EXAMPLE</NextMarker>
   <MaxItems>2</MaxItems>
   <IsTruncated>true</IsTruncated>
   <DistributionSummary>
      <Id>EDFDVBD6EXAMPLE</Id>
      <Status>Deployed</Status>
      <LastModifiedTime>2009-11-19T19:37:58Z</LastModifiedTime>
      <DomainName>d111111abcdef8.cloudfront.net</DomainName>
      <S3Origin>
         <DNSName>myawsbucket.s3.amazonaws.com</DNSName>
      </S3Origin>
      <CNAME>www.example.com</CNAME>
      <Comment>First distribution</Comment>
      <Enabled>true</Enabled>
      <TrustedSigners>
         <Self/>
      </TrustedSigners>
   </DistributionSummary>
   <StreamingDistributionSummary>
      <Id>EGTXBD79EXAMPLE</Id>
      <Status>InProgress</Status>
      <LastModifiedTime>2009-11-20T08:00:00Z</LastModifiedTime>
      <DomainName>s5c39gqb8ow64r.cloudfront.net</DomainName>
      <S3Origin>
         <DNSName>mystreamingbucket.s3.amazonaws.com</DNSName>
      </S3Origin>
      <Comment>Streaming</Comment>
      <Enabled>false</Enabled>
   </StreamingDistributionSummary>
</DistributionList>"#;

    let list = parse_distribution_list(doc.as_bytes())?;

    assert_eq!(list.marker, "RMPARXS293KSTG7");
    assert_eq!(list.next_marker.as_deref(), Some("EMLARXS9EXAMPLE"));
    assert_eq!(list.max_items, 2);
    assert!(list.is_truncated);
    assert_eq!(list.summaries.len(), 2);

    let first = &list.summaries[0];
    assert!(!first.is_streaming());
    assert_eq!(first.id, "EDFDVBD6EXAMPLE");
    assert_eq!(first.last_modified_time, time(2009, 11, 19, 19, 37, 58));
    let SummaryConfig::Standard(config) = &first.config else {
        panic!("first summary must be a standard distribution");
    };
    assert_eq!(config.origins[0].domain_name, "myawsbucket.s3.amazonaws.com");
    assert_eq!(config.cnames, strings(&["www.example.com"]));
    assert_eq!(config.comment, "First distribution");
    assert!(config.enabled);
    assert!(config.trusted_signers.as_ref().unwrap().is_self_trusted());

    let second = &list.summaries[1];
    assert!(second.is_streaming());
    assert_eq!(second.id, "EGTXBD79EXAMPLE");
    assert_eq!(second.status, "InProgress");
    let SummaryConfig::Streaming(config) = &second.config else {
        panic!("second summary must be a streaming distribution");
    };
    assert_eq!(
        config.origin.as_ref().map(|o| o.domain_name.as_str()),
        Some("mystreamingbucket.s3.amazonaws.com")
    );
    assert!(!config.enabled);
    Ok(())
}

#[test]
fn test_parse_empty_streaming_distribution_list() -> Result<()> {
    let doc = r#"<StreamingDistributionList>
   <Marker/>
   <MaxItems>100</MaxItems>
   <IsTruncated>false</IsTruncated>
</StreamingDistributionList>"#;

    let list = parse_distribution_list(doc.as_bytes())?;
    assert_eq!(
        list,
        DistributionList {
            max_items: 100,
            ..Default::default()
        }
    );
    Ok(())
}
