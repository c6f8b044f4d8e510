//! Pipeline configuration.
//!
//! Provides [`AppConfig`], resolved from environment variables. The local-mode
//! switches follow LocalStack conventions: a Lambda running inside LocalStack
//! sees `LOCALSTACK_HOSTNAME`, and local tooling sets `IS_LOCAL`.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Port LocalStack listens on.
pub const LOCALSTACK_PORT: u16 = 4566;

/// Pipeline configuration.
///
/// # Examples
///
/// ```
/// use itempipe_core::config::AppConfig;
///
/// let config = AppConfig::builder()
///     .is_local(true)
///     .localstack_host("localstack".into())
///     .build();
/// assert_eq!(config.localstack_endpoint(), "http://localstack:4566");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Bucket items are written to.
    #[builder(default = String::from("dev-storage-bucket"))]
    pub bucket_name: String,

    /// AWS region for the S3 client.
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Whether to target a LocalStack endpoint instead of AWS.
    #[builder(default = false)]
    pub is_local: bool,

    /// Host of the LocalStack endpoint, used only in local mode.
    #[builder(default = String::from("localhost"))]
    pub localstack_host: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `BUCKET_NAME` | `dev-storage-bucket` |
    /// | `AWS_REGION` | `us-east-1` |
    /// | `IS_LOCAL` | *(unset)* |
    /// | `LOCALSTACK_HOSTNAME` | *(unset, host `localhost`)* |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Local mode is on when either `IS_LOCAL` or `LOCALSTACK_HOSTNAME` is set
    /// to a non-empty value.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) is this with `std::env::var`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = var("BUCKET_NAME") {
            config.bucket_name = v;
        }
        if let Some(v) = var("AWS_REGION") {
            config.region = v;
        }
        let localstack_host = var("LOCALSTACK_HOSTNAME");
        config.is_local = localstack_host.is_some() || var("IS_LOCAL").is_some();
        if let Some(v) = localstack_host {
            config.localstack_host = v;
        }
        if let Some(v) = var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// LocalStack endpoint URL: `http://{localstack_host}:4566`.
    #[must_use]
    pub fn localstack_endpoint(&self) -> String {
        format!("http://{}:{LOCALSTACK_PORT}", self.localstack_host)
    }
}
