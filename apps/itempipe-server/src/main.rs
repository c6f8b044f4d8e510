//! Itempipe Server - local HTTP gateway for the create-item handler.
//!
//! Serves `POST /items` through the same handler the Lambda binary runs, so
//! the pipeline can be exercised end to end against LocalStack without a
//! deployed API gateway.
//!
//! # Usage
//!
//! ```text
//! IS_LOCAL=true BUCKET_NAME=dev-storage-bucket itempipe-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `127.0.0.1:3000` | Bind address |
//! | `BUCKET_NAME` | `dev-storage-bucket` | Bucket items are written to |
//! | `AWS_REGION` | `us-east-1` | Region for the S3 client |
//! | `LOCALSTACK_HOSTNAME` | *(unset)* | LocalStack host; enables local mode |
//! | `IS_LOCAL` | *(unset)* | Enables local mode against `localhost` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod gateway;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use itempipe_core::{AppConfig, CreateItemHandler, ObjectStore, S3ObjectStore};

use crate::gateway::ItemGateway;

/// Server version logged at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address.
const DEFAULT_GATEWAY_LISTEN: &str = "127.0.0.1:3000";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Resolve the bind address from `GATEWAY_LISTEN`.
fn gateway_listen_addr(value: Option<String>) -> Result<SocketAddr> {
    let raw = value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_GATEWAY_LISTEN.to_owned());
    raw.parse()
        .with_context(|| format!("invalid bind address: {raw}"))
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<S: ObjectStore + 'static>(
    listener: TcpListener,
    gateway: ItemGateway<S>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = gateway.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.log_level)?;

    let addr = gateway_listen_addr(std::env::var("GATEWAY_LISTEN").ok())?;

    info!(
        %addr,
        bucket = %config.bucket_name,
        region = %config.region,
        is_local = config.is_local,
        endpoint = ?config.is_local.then(|| config.localstack_endpoint()),
        version = VERSION,
        "starting itempipe server",
    );

    let store = S3ObjectStore::from_config(&config).await;
    let gateway = ItemGateway::new(CreateItemHandler::new(store, config.bucket_name.clone()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, gateway).await
}
