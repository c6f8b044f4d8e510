//! S3 failure classification.
//!
//! Storage failures arrive in several shapes: SDK service errors with an error
//! code, transport-level failures with none, or hand-built descriptors in tests.
//! [`BackendFailure`] flattens all of them into the same raw fields, and
//! [`classify_s3_error`] maps those fields onto a [`ClassifiedError`]: a code
//! from [`S3ErrorCode`], a human message, a retryability flag, and the HTTP
//! status when one was observed.
//!
//! # Usage
//!
//! ```
//! use itempipe_core::error::{BackendFailure, S3ErrorCode, classify_s3_error};
//!
//! let classified = classify_s3_error(&BackendFailure::named("SlowDown"));
//! assert_eq!(classified.code, S3ErrorCode::SlowDown);
//! assert!(classified.is_retryable);
//! ```

use std::fmt;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;

/// Code used when a failure carries neither a name nor a legacy code.
pub const UNKNOWN_CODE: &str = "Unknown";

/// S3 error codes the classifier knows about.
///
/// Any other code is kept verbatim in [`S3ErrorCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum S3ErrorCode {
    /// The bucket does not exist.
    NoSuchBucket,
    /// The object key does not exist.
    NoSuchKey,
    /// The caller lacks permission.
    AccessDenied,
    /// The bucket name is malformed.
    InvalidBucketName,
    /// The upload exceeds the maximum object size.
    EntityTooLarge,
    /// The object is archived.
    InvalidObjectState,
    /// Request rate too high.
    SlowDown,
    /// Service temporarily unavailable.
    ServiceUnavailable,
    /// Internal S3 error.
    InternalError,
    /// The socket was idle too long.
    RequestTimeout,
    /// Request timed out (JSON-protocol spelling).
    RequestTimeoutException,
    /// Request throttled.
    ThrottlingException,
    /// Too many requests.
    TooManyRequestsException,
    /// Any other code, kept verbatim.
    Unknown(String),
}

impl S3ErrorCode {
    /// Parse a raw error code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "NoSuchBucket" => Self::NoSuchBucket,
            "NoSuchKey" => Self::NoSuchKey,
            "AccessDenied" => Self::AccessDenied,
            "InvalidBucketName" => Self::InvalidBucketName,
            "EntityTooLarge" => Self::EntityTooLarge,
            "InvalidObjectState" => Self::InvalidObjectState,
            "SlowDown" => Self::SlowDown,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "InternalError" => Self::InternalError,
            "RequestTimeout" => Self::RequestTimeout,
            "RequestTimeoutException" => Self::RequestTimeoutException,
            "ThrottlingException" => Self::ThrottlingException,
            "TooManyRequestsException" => Self::TooManyRequestsException,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// The raw code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoSuchBucket => "NoSuchBucket",
            Self::NoSuchKey => "NoSuchKey",
            Self::AccessDenied => "AccessDenied",
            Self::InvalidBucketName => "InvalidBucketName",
            Self::EntityTooLarge => "EntityTooLarge",
            Self::InvalidObjectState => "InvalidObjectState",
            Self::SlowDown => "SlowDown",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::InternalError => "InternalError",
            Self::RequestTimeout => "RequestTimeout",
            Self::RequestTimeoutException => "RequestTimeoutException",
            Self::ThrottlingException => "ThrottlingException",
            Self::TooManyRequestsException => "TooManyRequestsException",
            Self::Unknown(code) => code,
        }
    }

    /// Fixed human-readable message for codes that have one.
    #[must_use]
    pub fn known_message(&self) -> Option<&'static str> {
        match self {
            Self::NoSuchBucket => Some("Bucket does not exist"),
            Self::NoSuchKey => Some("Object key does not exist"),
            Self::AccessDenied => Some("Insufficient permissions — check IAM policy"),
            Self::InvalidBucketName => Some("Invalid bucket name format"),
            Self::EntityTooLarge => Some("File exceeds maximum upload size"),
            Self::InvalidObjectState => Some("Object is archived — restore before accessing"),
            _ => None,
        }
    }

    /// Whether the failure is transient and worth retrying by the caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SlowDown
                | Self::ServiceUnavailable
                | Self::InternalError
                | Self::RequestTimeout
                | Self::RequestTimeoutException
                | Self::ThrottlingException
                | Self::TooManyRequestsException
        )
    }
}

impl fmt::Display for S3ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw failure fields as observed from the storage backend.
///
/// `name` takes precedence over the legacy `code` field when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendFailure {
    /// Error name (the SDK error code for service errors).
    pub name: Option<String>,
    /// Legacy error code field.
    pub code: Option<String>,
    /// Backend-supplied message.
    pub message: Option<String>,
    /// HTTP status of the failed response, if a response was received.
    pub http_status_code: Option<u16>,
}

impl BackendFailure {
    /// A failure carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status_code = Some(status);
        self
    }
}

impl<E> From<&SdkError<E, HttpResponse>> for BackendFailure
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    fn from(err: &SdkError<E, HttpResponse>) -> Self {
        let http_status_code = err.raw_response().map(|resp| resp.status().as_u16());

        let (name, message) = match err {
            SdkError::ServiceError(ctx) => (
                ctx.err().code().map(ToOwned::to_owned),
                ctx.err().message().map(ToOwned::to_owned),
            ),
            SdkError::TimeoutError(_) => (Some("TimeoutError".to_owned()), None),
            SdkError::DispatchFailure(_) => (Some("DispatchFailure".to_owned()), None),
            SdkError::ResponseError(_) => (Some("ResponseError".to_owned()), None),
            SdkError::ConstructionFailure(_) => (Some("ConstructionFailure".to_owned()), None),
            _ => (None, None),
        };

        Self {
            name,
            code: None,
            message: message.or_else(|| Some(DisplayErrorContext(err).to_string())),
            http_status_code,
        }
    }
}

/// A storage failure normalized into code, message, retryability, and status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClassifiedError {
    /// The underlying error code.
    pub code: S3ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Whether a caller may retry.
    pub is_retryable: bool,
    /// HTTP status of the failed response, if known.
    pub status_code: Option<u16>,
}

/// Classify a raw backend failure.
#[must_use]
pub fn classify_s3_error(failure: &BackendFailure) -> ClassifiedError {
    let raw_code = failure
        .name
        .as_deref()
        .or(failure.code.as_deref())
        .unwrap_or(UNKNOWN_CODE);
    let code = S3ErrorCode::from_code(raw_code);

    let message = code.known_message().map_or_else(
        || {
            format!(
                "S3 operation failed: {}",
                failure.message.as_deref().unwrap_or(raw_code)
            )
        },
        ToOwned::to_owned,
    );

    ClassifiedError {
        is_retryable: code.is_retryable(),
        code,
        message,
        status_code: failure.http_status_code,
    }
}

/// Classify an `aws-sdk-s3` operation error.
#[must_use]
pub fn classify_sdk_error<E>(err: &SdkError<E, HttpResponse>) -> ClassifiedError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    classify_s3_error(&BackendFailure::from(err))
}
