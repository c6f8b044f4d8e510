//! Local HTTP gateway implementing hyper's `Service` trait.
//!
//! [`ItemGateway`] stands in for the managed API gateway during local
//! development. It handles:
//!
//! 1. Health check (`GET /health`)
//! 2. Request body collection
//! 3. Translation into an [`ApiGatewayProxyEvent`] and back
//! 4. `404 NOT_FOUND` for every other route

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, error};
use uuid::Uuid;

use itempipe_core::response::error_response;
use itempipe_core::{CreateItemHandler, ObjectStore};
use itempipe_model::{ApiErrorCode, ApiGatewayProxyEvent, ApiGatewayProxyResponse};

/// Header carrying the gateway request id, in and out.
pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// Path the create-item route is mounted on.
pub const ITEMS_PATH: &str = "/items";

/// Health check path.
pub const HEALTH_PATH: &str = "/health";

/// Routes requests to a [`CreateItemHandler`].
#[derive(Debug)]
pub struct ItemGateway<S> {
    handler: Arc<CreateItemHandler<S>>,
}

impl<S: ObjectStore> ItemGateway<S> {
    /// Wrap a handler.
    #[must_use]
    pub fn new(handler: CreateItemHandler<S>) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Route a request whose body has already been collected.
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> http::Response<Full<Bytes>> {
        let (parts, body) = req.into_parts();
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned);

        debug!(method = %parts.method, uri = %parts.uri, request_id = %request_id, "processing request");

        let path = parts.uri.path();
        let resp = if parts.method == http::Method::POST && path == ITEMS_PATH {
            let event = ApiGatewayProxyEvent {
                body: body_text(body),
                ..ApiGatewayProxyEvent::default()
            }
            .request_id(request_id.clone());
            self.handler.handle(&event).await
        } else if parts.method == http::Method::GET && path == HEALTH_PATH {
            return health_check_response();
        } else {
            error_response(
                ApiErrorCode::NotFound,
                format!("No route for {} {path}", parts.method),
                &request_id,
            )
        };

        into_http_response(resp, &request_id)
    }
}

impl<S> Clone for ItemGateway<S> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<S: ObjectStore + 'static> Service<http::Request<Incoming>> for ItemGateway<S> {
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let gateway = self.clone();

        Box::pin(async move {
            let (parts, incoming) = req.into_parts();
            let body = match incoming.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    error!(error = %err, "failed to collect request body");
                    Bytes::new()
                }
            };

            Ok(gateway.dispatch(http::Request::from_parts(parts, body)).await)
        })
    }
}

/// Empty or non-UTF-8 bodies are treated as absent.
fn body_text(body: Bytes) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    String::from_utf8(body.to_vec()).ok()
}

/// Produce a health check response.
fn health_check_response() -> http::Response<Full<Bytes>> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from_static(br#"{"status":"ok"}"#)))
        .expect("static health response should be valid")
}

/// Convert a proxy response into an HTTP response.
fn into_http_response(resp: ApiGatewayProxyResponse, request_id: &str) -> http::Response<Full<Bytes>> {
    let mut builder = http::Response::builder().status(resp.status());
    for (name, value) in &resp.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = builder.header(REQUEST_ID_HEADER, request_id);

    builder
        .body(Full::new(Bytes::from(resp.body)))
        .unwrap_or_else(|err| {
            error!(error = %err, "invalid response headers");
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
