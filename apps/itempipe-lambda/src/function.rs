//! Lambda invocation adapter.

use itempipe_core::{CreateItemHandler, ObjectStore};
use itempipe_model::{ApiGatewayProxyEvent, ApiGatewayProxyResponse};
use lambda_runtime::LambdaEvent;
use tracing::debug;

/// Run one invocation. Always answers with a proxy response.
pub(crate) async fn function_handler<S: ObjectStore>(
    event: LambdaEvent<ApiGatewayProxyEvent>,
    handler: &CreateItemHandler<S>,
) -> Result<ApiGatewayProxyResponse, lambda_runtime::Error> {
    debug!(aws_request_id = %event.context.request_id, "invocation received");
    Ok(handler.handle(&event.payload).await)
}
