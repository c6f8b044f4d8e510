//! Create-item pipeline.
//!
//! Validates a create-item request, persists the item as a JSON document in
//! S3, and classifies storage failures into stable codes with retryability
//! hints. [`handler::CreateItemHandler`] wires the pieces together behind the
//! [`store::ObjectStore`] seam; the binaries in `apps/` host it either as a
//! Lambda function or behind a local HTTP gateway.

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod store;
pub mod validation;

pub use client::{ClientCache, ClientSettings, reset_s3_client, s3_client};
pub use config::AppConfig;
pub use error::{BackendFailure, ClassifiedError, S3ErrorCode, classify_s3_error, classify_sdk_error};
pub use handler::{CreateItemHandler, HandlerError};
pub use store::{ObjectStore, PutObjectRequest, S3ObjectStore};
pub use validation::{ValidationError, validate_create_item};
