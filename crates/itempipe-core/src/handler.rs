//! The create-item request handler.
//!
//! Flow for one event:
//!
//! 1. Resolve the request id (gateway id, else a fresh UUID).
//! 2. Parse the body as untyped JSON; failure is a `400 INVALID_JSON`.
//! 3. Validate; failure is a `400 VALIDATION_ERROR` carrying the rule message.
//! 4. Build the [`Item`] and write it to `items/{id}.json`.
//! 5. On storage failure, classify and log it, then answer `500 INTERNAL_ERROR`.
//!
//! Every outcome is an [`ApiGatewayProxyResponse`]; the handler never fails.

use itempipe_model::{
    ApiErrorCode, ApiGatewayProxyEvent, ApiGatewayProxyResponse, Item, JSON_CONTENT_TYPE,
};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span, warn};

use crate::error::{ClassifiedError, classify_s3_error};
use crate::response;
use crate::store::{ObjectStore, PutObjectRequest};
use crate::validation::{ValidationError, validate_create_item};

/// Message returned when the body is not parseable JSON.
pub const INVALID_JSON_MESSAGE: &str = "Request body is not valid JSON";

/// Message returned for every unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure inside the create path, after the body has been parsed.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The body failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The item could not be persisted.
    #[error(transparent)]
    Persist(#[from] ClassifiedError),

    /// The item or response could not be encoded.
    #[error("failed to encode item: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handles create-item events against an [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct CreateItemHandler<S> {
    store: S,
    bucket: String,
}

impl<S: ObjectStore> CreateItemHandler<S> {
    /// Create a handler writing into `bucket`.
    pub fn new(store: S, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Target bucket.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one event.
    pub async fn handle(&self, event: &ApiGatewayProxyEvent) -> ApiGatewayProxyResponse {
        let request_id = event
            .gateway_request_id()
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), ToOwned::to_owned);
        let span = info_span!("create_item", request_id = %request_id);
        self.respond(event, &request_id).instrument(span).await
    }

    async fn respond(
        &self,
        event: &ApiGatewayProxyEvent,
        request_id: &str,
    ) -> ApiGatewayProxyResponse {
        let raw = event.body.as_deref().unwrap_or_default();
        let body = match serde_json::from_str::<Value>(raw) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "request body is not valid JSON");
                return response::error_response(
                    ApiErrorCode::InvalidJson,
                    INVALID_JSON_MESSAGE,
                    request_id,
                );
            }
        };

        let result = self
            .create(&body)
            .await
            .and_then(|item| response::created(&item).map_err(HandlerError::from));

        match result {
            Ok(resp) => resp,
            Err(HandlerError::Validation(err)) => {
                warn!(error = %err, "validation failed");
                response::error_response(ApiErrorCode::ValidationError, err.to_string(), request_id)
            }
            Err(err) => {
                error!(error = %err, "unexpected error");
                response::error_response(
                    ApiErrorCode::InternalError,
                    INTERNAL_ERROR_MESSAGE,
                    request_id,
                )
            }
        }
    }

    /// Validate `body`, build the item, and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Validation`] for a rejected body and
    /// [`HandlerError::Persist`] with the classified storage failure.
    pub async fn create(&self, body: &Value) -> Result<Item, HandlerError> {
        let input = validate_create_item(body)?;
        info!(name = %input.name, "creating item");

        let item = Item::create(input);
        let key = item.object_key();
        let request = PutObjectRequest {
            bucket: self.bucket.clone(),
            key: key.clone(),
            body: serde_json::to_vec(&item)?,
            content_type: JSON_CONTENT_TYPE.to_owned(),
        };

        if let Err(failure) = self.store.put_object(request).await {
            let classified = classify_s3_error(&failure);
            error!(
                item_id = %item.id,
                key = %key,
                bucket = %self.bucket,
                error_code = %classified.code,
                is_retryable = classified.is_retryable,
                status_code = classified.status_code,
                "failed to persist item"
            );
            return Err(classified.into());
        }

        info!(item_id = %item.id, key = %key, "item created and persisted");
        Ok(item)
    }
}
