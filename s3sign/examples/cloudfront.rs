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

use std::sync::Arc;

use anyhow::Result;
use s3sign::aws::{Config, DefaultCredentialProvider};
use s3sign::cloudfront::{parse_distribution_list, RequestSigner};
use s3sign::{Context, OsEnv, Signer};

const LIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DistributionList xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Marker/>
   <MaxItems>100</MaxItems>
   <IsTruncated>false</IsTruncated>
   <DistributionSummary>
      <Id>EDFDVBD6EXAMPLE</Id>
      <Status>Deployed</Status>
      <LastModifiedTime>2009-11-19T19:37:58Z</LastModifiedTime>
      <DomainName>d111111abcdef8.cloudfront.net</DomainName>
      <S3Origin>
         <DNSName>myawsbucket.s3.amazonaws.com</DNSName>
      </S3Origin>
      <Comment>example</Comment>
      <Enabled>true</Enabled>
   </DistributionSummary>
</DistributionList>"#;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Arc::new(Config::new().from_env(&ctx));
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(config), RequestSigner::new());

    let mut req = http::Request::get("https://cloudfront.amazonaws.com/2010-11-01/distribution")
        .body(())?
        .into_parts()
        .0;
    signer.sign(&mut req, None).await?;
    println!("date: {:?}", req.headers.get(http::header::DATE));

    // A response body as CloudFront would send it.
    let list = parse_distribution_list(LIST.as_bytes())?;
    for summary in &list.summaries {
        println!("{} {} {}", summary.id, summary.status, summary.domain_name);
    }

    Ok(())
}
