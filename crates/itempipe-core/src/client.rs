//! Process-wide S3 client.
//!
//! The client is built once per process on first use and shared by every
//! invocation afterwards. [`ClientCache`] holds it; the free functions
//! [`s3_client`] and [`reset_s3_client`] operate on the process-wide instance.
//! Construction is double-checked under the write lock, so concurrent first
//! calls on a multi-threaded runtime still build a single client.

use std::sync::Arc;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::AppConfig;

/// Access key used against LocalStack.
pub const LOCAL_ACCESS_KEY_ID: &str = "test";

/// Secret key used against LocalStack.
pub const LOCAL_SECRET_ACCESS_KEY: &str = "test";

static S3_CLIENT: ClientCache = ClientCache::new();

/// How the S3 client is wired, derived from [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSettings {
    /// LocalStack: explicit endpoint, path-style addressing, placeholder credentials.
    Local {
        /// Endpoint URL.
        endpoint: String,
        /// Region.
        region: String,
    },
    /// AWS: region from config, credentials from the default provider chain.
    Remote {
        /// Region.
        region: String,
    },
}

impl ClientSettings {
    /// Derive the settings for a configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        if config.is_local {
            Self::Local {
                endpoint: config.localstack_endpoint(),
                region: config.region.clone(),
            }
        } else {
            Self::Remote {
                region: config.region.clone(),
            }
        }
    }

    /// Build a client for these settings.
    pub async fn build(&self) -> aws_sdk_s3::Client {
        match self {
            Self::Local { endpoint, region } => {
                let creds = Credentials::new(
                    LOCAL_ACCESS_KEY_ID,
                    LOCAL_SECRET_ACCESS_KEY,
                    None,
                    None,
                    "itempipe-local",
                );

                let config = aws_sdk_s3::config::Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(Region::new(region.clone()))
                    .credentials_provider(creds)
                    .endpoint_url(endpoint)
                    .force_path_style(true)
                    .build();

                aws_sdk_s3::Client::from_conf(config)
            }
            Self::Remote { region } => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region.clone()))
                    .load()
                    .await;

                aws_sdk_s3::Client::new(&shared)
            }
        }
    }
}

/// Lazily-initialized, resettable S3 client slot.
#[derive(Debug, Default)]
pub struct ClientCache {
    inner: RwLock<Option<Arc<aws_sdk_s3::Client>>>,
}

impl ClientCache {
    /// An empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::const_new(None),
        }
    }

    /// Return the cached client, building it from `config` on first call.
    ///
    /// Later calls return the same instance regardless of `config` until
    /// [`reset`](Self::reset) is called.
    pub async fn get_or_init(&self, config: &AppConfig) -> Arc<aws_sdk_s3::Client> {
        if let Some(client) = self.inner.read().await.as_ref() {
            return Arc::clone(client);
        }

        let mut slot = self.inner.write().await;
        if let Some(client) = slot.as_ref() {
            return Arc::clone(client);
        }

        let settings = ClientSettings::from_config(config);
        debug!(?settings, "building S3 client");
        let client = Arc::new(settings.build().await);
        *slot = Some(Arc::clone(&client));
        client
    }

    /// Drop the cached client so the next call rebuilds it.
    pub async fn reset(&self) {
        *self.inner.write().await = None;
    }

    /// Whether a client is currently cached.
    pub async fn is_initialized(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

/// The process-wide S3 client.
pub async fn s3_client(config: &AppConfig) -> Arc<aws_sdk_s3::Client> {
    S3_CLIENT.get_or_init(config).await
}

/// Clear the process-wide S3 client.
pub async fn reset_s3_client() {
    S3_CLIENT.reset().await;
}
