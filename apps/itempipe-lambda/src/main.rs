//! Itempipe Lambda - create-item handler on the AWS Lambda runtime.
//!
//! Receives API Gateway proxy events and answers with proxy responses. The S3
//! client is built once at cold start and reused by every invocation.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BUCKET_NAME` | `dev-storage-bucket` | Bucket items are written to |
//! | `AWS_REGION` | `us-east-1` | Region for the S3 client |
//! | `LOCALSTACK_HOSTNAME` | *(unset)* | LocalStack host; enables local mode |
//! | `IS_LOCAL` | *(unset)* | Enables local mode against `localhost` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod function;

use std::sync::Arc;

use anyhow::Context;
use itempipe_core::{AppConfig, CreateItemHandler, S3ObjectStore};
use itempipe_model::ApiGatewayProxyEvent;
use lambda_runtime::{LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::function::function_handler;

/// Initialize JSON tracing for CloudWatch.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .without_time()
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = AppConfig::from_env();
    init_tracing(&config.log_level)?;

    info!(
        bucket = %config.bucket_name,
        region = %config.region,
        is_local = config.is_local,
        "starting itempipe lambda",
    );

    let store = S3ObjectStore::from_config(&config).await;
    let handler = Arc::new(CreateItemHandler::new(store, config.bucket_name));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ApiGatewayProxyEvent>| {
        let handler = Arc::clone(&handler);
        async move { function_handler(event, handler.as_ref()).await }
    }))
    .await
}
