//! Create-item persistence integration tests.

#[cfg(test)]
mod tests {
    use itempipe_model::{ApiGatewayProxyEvent, Item};

    use crate::{create_item_bucket, drop_item_bucket, handler, s3_client, stored_item_keys};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_persist_created_item_as_json() {
        let client = s3_client().await;
        let bucket = create_item_bucket(&client, "create").await;
        let handler = handler(&client, &bucket);

        let resp = handler
            .handle(&ApiGatewayProxyEvent::with_body(
                r#"{"name":"  Test Item  ","description":"A test"}"#,
            ))
            .await;
        assert_eq!(resp.status_code, 201, "{}", resp.body);
        let item: Item = serde_json::from_str(&resp.body).expect("item body");
        assert_eq!(item.name, "Test Item");

        let obj = client
            .get_object()
            .bucket(&bucket)
            .key(item.object_key())
            .send()
            .await
            .expect("get_object");
        assert_eq!(obj.content_type(), Some("application/json"));

        let data = obj
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        let stored: Item = serde_json::from_slice(&data).expect("stored item");
        assert_eq!(stored, item);

        drop_item_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_persist_concurrent_items_under_distinct_keys() {
        let client = s3_client().await;
        let bucket = create_item_bucket(&client, "concurrent").await;
        let handler = handler(&client, &bucket);

        let a = ApiGatewayProxyEvent::with_body(r#"{"name":"Item A"}"#);
        let b = ApiGatewayProxyEvent::with_body(r#"{"name":"Item B"}"#);
        let (ra, rb) = futures::join!(handler.handle(&a), handler.handle(&b));
        assert_eq!(ra.status_code, 201);
        assert_eq!(rb.status_code, 201);

        let ia: Item = serde_json::from_str(&ra.body).expect("item A");
        let ib: Item = serde_json::from_str(&rb.body).expect("item B");
        let mut keys = stored_item_keys(&client, &bucket).await;
        keys.sort();
        let mut expected = vec![ia.object_key(), ib.object_key()];
        expected.sort();
        assert_eq!(keys, expected);

        drop_item_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_not_write_rejected_items() {
        let client = s3_client().await;
        let bucket = create_item_bucket(&client, "rejected").await;
        let handler = handler(&client, &bucket);

        for body in [r#"{"description":"No name provided"}"#, "{not json"] {
            let resp = handler.handle(&ApiGatewayProxyEvent::with_body(body)).await;
            assert_eq!(resp.status_code, 400, "{body}");
        }

        assert!(stored_item_keys(&client, &bucket).await.is_empty());

        drop_item_bucket(&client, &bucket).await;
    }
}
