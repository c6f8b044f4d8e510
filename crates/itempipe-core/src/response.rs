//! Response envelope construction.

use itempipe_model::{ApiErrorCode, ApiGatewayProxyResponse, ErrorBody, Item};

/// `201 Created` with the item as the body.
pub fn created(item: &Item) -> Result<ApiGatewayProxyResponse, serde_json::Error> {
    let body = serde_json::to_string(item)?;
    Ok(ApiGatewayProxyResponse::json(http::StatusCode::CREATED, body))
}

/// Error response whose status is derived from `code`.
#[must_use]
pub fn error_response(
    code: ApiErrorCode,
    message: impl Into<String>,
    request_id: &str,
) -> ApiGatewayProxyResponse {
    let body = ErrorBody::new(code, message, request_id);
    let json = serde_json::to_string(&body).expect("JSON serialization of error cannot fail");
    ApiGatewayProxyResponse::json(code.status_code(), json)
}
