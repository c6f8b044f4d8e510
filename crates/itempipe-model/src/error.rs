//! Error payloads returned to API callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error codes exposed in the `error` field of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ApiErrorCode {
    /// The body could not be parsed as JSON.
    InvalidJson,
    /// The body parsed but violated a validation rule.
    ValidationError,
    /// Persistence or another internal step failed.
    InternalError,
    /// No route matched (local gateway only).
    NotFound,
}

impl ApiErrorCode {
    /// Returns the wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::NotFound => "NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::InvalidJson | Self::ValidationError => http::StatusCode::BAD_REQUEST,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => http::StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of an error response.
///
/// ```json
/// {"error": "VALIDATION_ERROR", "message": "name must be 255 characters or fewer", "requestId": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Error code.
    pub error: ApiErrorCode,
    /// Caller-facing message. Never carries backend detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Correlation id of the invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorBody {
    /// Create an error body with a message and request id.
    #[must_use]
    pub fn new(error: ApiErrorCode, message: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            error,
            message: Some(message.into()),
            request_id: Some(request_id.into()),
        }
    }
}
