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
use std::time::Duration;

use anyhow::Result;
use s3sign::aws::sign_request::{v2, v4};
use s3sign::aws::{Config, DefaultCredentialProvider};
use s3sign::{Context, OsEnv, Signer};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Arc::new(Config::new().from_env(&ctx));

    // Header signing with SigV4.
    let signer = Signer::new(
        ctx.clone(),
        DefaultCredentialProvider::new(config.clone()),
        v4::RequestSigner::new(),
    );
    let mut req = http::Request::get("https://my-bucket.s3.eu-west-1.amazonaws.com/my-object")
        .body(())?
        .into_parts()
        .0;
    signer.sign(&mut req, None).await?;
    for (name, value) in &req.headers {
        println!("{name}: {value:?}");
    }

    // Presigned URL with the legacy scheme.
    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::new(config),
        v2::RequestSigner::new().with_bucket("my-bucket"),
    );
    let mut req = http::Request::get("https://my-bucket.s3.amazonaws.com/my-object")
        .body(())?
        .into_parts()
        .0;
    signer.sign(&mut req, Some(Duration::from_secs(3600))).await?;
    println!("presigned: {}", req.uri);

    Ok(())
}
