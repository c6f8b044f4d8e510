//! API Gateway Lambda proxy integration envelope.
//!
//! Only the fields the create-item handler reads are modelled on the event
//! side. Both REST (payload v1) and HTTP API (payload v2) events carry `body`
//! and `requestContext.requestId`, so one type accepts either; unknown fields
//! are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Content type used for every response and stored document.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Incoming API Gateway proxy event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyEvent {
    /// Raw request body, `None` when the request had no body.
    #[serde(default)]
    pub body: Option<String>,
    /// Request context supplied by the gateway.
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

/// The part of the gateway request context the handler uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Gateway-assigned request id.
    #[serde(default)]
    pub request_id: Option<String>,
}

impl ApiGatewayProxyEvent {
    /// Event carrying the given body and no request context.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            request_context: None,
        }
    }

    /// Attach a gateway request id.
    #[must_use]
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_context = Some(RequestContext {
            request_id: Some(request_id.into()),
        });
        self
    }

    /// Gateway request id, if one was supplied.
    #[must_use]
    pub fn gateway_request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.request_id.as_deref())
    }
}

/// Outgoing API Gateway proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
    /// Always `false`: bodies are UTF-8 JSON.
    pub is_base64_encoded: bool,
}

impl ApiGatewayProxyResponse {
    /// A JSON response with the given status and pre-encoded body.
    #[must_use]
    pub fn json(status: http::StatusCode, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_owned(), JSON_CONTENT_TYPE.to_owned());
        Self {
            status_code: status.as_u16(),
            headers,
            body: body.into(),
            is_base64_encoded: false,
        }
    }

    /// The status code as an [`http::StatusCode`].
    ///
    /// Falls back to `500` if the stored code is out of range.
    #[must_use]
    pub fn status(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status_code)
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}
