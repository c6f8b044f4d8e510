//! Data types shared by the itempipe handler, Lambda entrypoint, and local
//! gateway.
//!
//! This crate has no I/O. It defines:
//!
//! - [`Item`], the entity persisted as `items/{id}.json`
//! - [`ApiGatewayProxyEvent`] / [`ApiGatewayProxyResponse`], the subset of the
//!   API Gateway Lambda proxy integration envelope the handler reads and writes
//! - [`ApiErrorCode`] / [`ErrorBody`], the error payloads returned to callers

pub mod error;
pub mod event;
pub mod item;

pub use error::{ApiErrorCode, ErrorBody};
pub use event::{ApiGatewayProxyEvent, ApiGatewayProxyResponse, JSON_CONTENT_TYPE, RequestContext};
pub use item::{CreateItemInput, Item};
