//! Storage failure classification integration tests.

#[cfg(test)]
mod tests {
    use itempipe_core::error::S3ErrorCode;
    use itempipe_core::{HandlerError, classify_sdk_error};
    use itempipe_model::{ApiErrorCode, ApiGatewayProxyEvent, ErrorBody};

    use crate::{handler, s3_client, unique_bucket};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_internal_error_for_missing_bucket() {
        let client = s3_client().await;
        let handler = handler(&client, &unique_bucket("missing"));

        let resp = handler
            .handle(&ApiGatewayProxyEvent::with_body(r#"{"name":"Orphan"}"#).request_id("req-1"))
            .await;
        assert_eq!(resp.status_code, 500);

        let body: ErrorBody = serde_json::from_str(&resp.body).expect("error body");
        assert_eq!(body.error, ApiErrorCode::InternalError);
        assert_eq!(body.request_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_classify_missing_bucket() {
        let client = s3_client().await;
        let handler = handler(&client, &unique_bucket("missing"));

        let err = handler
            .create(&serde_json::json!({"name": "Orphan"}))
            .await
            .expect_err("write to a missing bucket should fail");
        let classified = match err {
            HandlerError::Persist(classified) => classified,
            other => panic!("expected persist error, got {other:?}"),
        };
        assert_eq!(classified.code, S3ErrorCode::NoSuchBucket);
        assert_eq!(classified.message, "Bucket does not exist");
        assert!(!classified.is_retryable);
        assert_eq!(classified.status_code, Some(404));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_classify_sdk_error_for_missing_key() {
        let client = s3_client().await;
        let bucket = crate::create_item_bucket(&client, "nokey").await;

        let err = client
            .get_object()
            .bucket(&bucket)
            .key("items/does-not-exist.json")
            .send()
            .await
            .expect_err("missing key");
        let classified = classify_sdk_error(&err);
        assert_eq!(classified.code, S3ErrorCode::NoSuchKey);
        assert!(!classified.is_retryable);

        crate::drop_item_bucket(&client, &bucket).await;
    }
}
