//! Integration tests for the create-item pipeline.
//!
//! These tests require LocalStack (or any S3-compatible server) at
//! `localhost:4566`; the gateway tests additionally require a running
//! `itempipe-server`. They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p itempipe-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use itempipe_core::{AppConfig, ClientCache, CreateItemHandler, S3ObjectStore};
use itempipe_model::item::ITEM_KEY_PREFIX;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// LocalStack host, from `LOCALSTACK_HOSTNAME`.
fn localstack_host() -> String {
    std::env::var("LOCALSTACK_HOSTNAME").unwrap_or_else(|_| "localhost".to_owned())
}

/// Base URL of a running `itempipe-server`.
#[must_use]
pub fn gateway_url() -> String {
    std::env::var("ITEMPIPE_GATEWAY_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_owned())
}

/// Local-mode configuration targeting `bucket`.
#[must_use]
pub fn local_config(bucket: &str) -> AppConfig {
    AppConfig::builder()
        .bucket_name(bucket.to_owned())
        .is_local(true)
        .localstack_host(localstack_host())
        .build()
}

/// Build a local-mode S3 client through the pipeline's own client factory.
pub async fn s3_client() -> Arc<aws_sdk_s3::Client> {
    init_tracing();
    ClientCache::new().get_or_init(&local_config("unused")).await
}

/// A handler writing into `bucket` over `client`.
#[must_use]
pub fn handler(client: &Arc<aws_sdk_s3::Client>, bucket: &str) -> CreateItemHandler<S3ObjectStore> {
    CreateItemHandler::new(S3ObjectStore::new(Arc::clone(client)), bucket)
}

/// A bucket name no other test run will collide with.
#[must_use]
pub fn unique_bucket(label: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("itempipe-{label}-{}", &suffix[..8])
}

/// Create a fresh bucket for items. Pair with [`drop_item_bucket`].
pub async fn create_item_bucket(client: &aws_sdk_s3::Client, label: &str) -> String {
    let bucket = unique_bucket(label);
    if let Err(err) = client.create_bucket().bucket(&bucket).send().await {
        panic!("create_bucket {bucket}: {err}");
    }
    bucket
}

/// Keys currently stored under `items/`.
pub async fn stored_item_keys(client: &aws_sdk_s3::Client, bucket: &str) -> Vec<String> {
    let mut pages = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(ITEM_KEY_PREFIX)
        .into_paginator()
        .send();

    let mut keys = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.unwrap_or_else(|err| panic!("list_objects_v2 {bucket}: {err}"));
        keys.extend(page.contents().iter().filter_map(|obj| obj.key().map(ToOwned::to_owned)));
    }
    keys
}

/// Remove every stored item and the bucket itself. Best effort.
pub async fn drop_item_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    for key in stored_item_keys(client, bucket).await {
        client.delete_object().bucket(bucket).key(key).send().await.ok();
    }
    client.delete_bucket().bucket(bucket).send().await.ok();
}

mod test_error;
mod test_gateway;
mod test_pipeline;
