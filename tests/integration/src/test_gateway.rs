//! Local gateway integration tests.
//!
//! Require `itempipe-server` running against LocalStack with its
//! `BUCKET_NAME` bucket created.

#[cfg(test)]
mod tests {
    use itempipe_model::{ApiErrorCode, ErrorBody, Item};

    use crate::gateway_url;

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_item_through_gateway() {
        let resp = reqwest::Client::new()
            .post(format!("{}/items", gateway_url()))
            .header("x-amzn-requestid", "gw-req-1")
            .json(&serde_json::json!({"name": "Gateway Item"}))
            .send()
            .await
            .expect("POST /items");
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        assert_eq!(resp.headers()["x-amzn-requestid"], "gw-req-1");

        let item: Item = resp.json().await.expect("item body");
        assert_eq!(item.name, "Gateway Item");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_json_through_gateway() {
        let resp = reqwest::Client::new()
            .post(format!("{}/items", gateway_url()))
            .body("{not json")
            .send()
            .await
            .expect("POST /items");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: ErrorBody = resp.json().await.expect("error body");
        assert_eq!(body.error, ApiErrorCode::InvalidJson);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_health_and_not_found() {
        let client = reqwest::Client::new();

        let health = client
            .get(format!("{}/health", gateway_url()))
            .send()
            .await
            .expect("GET /health");
        assert_eq!(health.status(), reqwest::StatusCode::OK);

        let missing = client
            .get(format!("{}/nowhere", gateway_url()))
            .send()
            .await
            .expect("GET /nowhere");
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
