//! Cart operations through the HTTP API.

#![allow(clippy::indexing_slicing)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use vitrine_integration_tests::{TestClient, bundled_app, decimal};

#[tokio::test]
async fn test_new_cart_is_empty() {
    let mut client = TestClient::new(bundled_app().await);

    let (status, body) = client.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total_items"], json!(0));
    assert_eq!(decimal(&body["total_price"]), Decimal::ZERO);

    let (_, body) = client.get("/cart/count").await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_add_merges_same_line() {
    let mut client = TestClient::new(bundled_app().await);

    client.post("/cart/add", &json!({ "product_id": 1 })).await;
    let (status, body) = client.post("/cart/add", &json!({ "product_id": 1 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["quantity"], json!(2));
    assert_eq!(body["total_items"], json!(2));
    assert_eq!(decimal(&body["items"][0]["line_total"]), Decimal::new(48, 0));
    assert_eq!(decimal(&body["total_price"]), Decimal::new(48, 0));
}

#[tokio::test]
async fn test_options_distinguish_lines() {
    let mut client = TestClient::new(bundled_app().await);

    let black = json!({
        "product_id": 1,
        "selected_options": { "color": "black", "size": "M" }
    });
    // Same options, different key order
    let black_again = json!({
        "product_id": 1,
        "selected_options": { "size": "M", "color": "black" }
    });
    let sand = json!({
        "product_id": 1,
        "selected_options": { "color": "sand", "size": "M" }
    });

    client.post("/cart/add", &black).await;
    client.post("/cart/add", &black_again).await;
    client.post("/cart/add", &sand).await;
    let (_, body) = client.post("/cart/add", &json!({ "product_id": 1 })).await;

    let items = body["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["quantity"], json!(2));
    assert_eq!(items[0]["selected_options"]["color"], json!("black"));
    assert_eq!(items[1]["quantity"], json!(1));
    assert_eq!(items[2]["selected_options"], json!(null));
    assert_eq!(body["total_items"], json!(4));
}

#[tokio::test]
async fn test_option_numbers_are_returned_as_sent() {
    let mut client = TestClient::new(bundled_app().await);

    let options = json!({ "size": 1, "weight": 2.5, "serial": 9_007_199_254_740_993_u64 });
    let (_, body) = client
        .post("/cart/add", &json!({ "product_id": 1, "selected_options": options }))
        .await;

    assert_eq!(body["items"][0]["selected_options"], options);
    assert_eq!(body["items"][0]["selected_options"]["size"].to_string(), "1");

    // An integral float matches the integer form and merges into the same line
    let same = json!({ "size": 1.0, "weight": 2.5, "serial": 9_007_199_254_740_993_u64 });
    let (_, body) = client
        .post("/cart/add", &json!({ "product_id": 1, "selected_options": same }))
        .await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["quantity"], json!(2));
}

#[tokio::test]
async fn test_add_unknown_product() {
    let mut client = TestClient::new(bundled_app().await);

    let (status, body) = client.post("/cart/add", &json!({ "product_id": 404 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (_, body) = client.get("/cart/count").await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_add_extended_only_product_after_upgrade() {
    let mut client = TestClient::new(bundled_app().await);

    let (status, _) = client.post("/cart/add", &json!({ "product_id": 5 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    client.get("/product/5").await;
    let (status, body) = client.post("/cart/add", &json!({ "product_id": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["total_price"]), Decimal::new(64, 0));
}

#[tokio::test]
async fn test_update_quantity() {
    let mut client = TestClient::new(bundled_app().await);

    client.post("/cart/add", &json!({ "product_id": 2 })).await;
    client.post("/cart/add", &json!({ "product_id": 3 })).await;

    let (_, body) = client
        .post("/cart/update", &json!({ "index": 0, "quantity": 4 }))
        .await;
    assert_eq!(body["items"][0]["quantity"], json!(4));
    // 4 x 18.50 + 29.00
    assert_eq!(decimal(&body["total_price"]), Decimal::new(103, 0));
    assert_eq!(body["total_items"], json!(5));

    // Stale index is ignored
    let (status, body) = client
        .post("/cart/update", &json!({ "index": 7, "quantity": 2 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], json!(5));

    // Zero removes the line
    let (_, body) = client
        .post("/cart/update", &json!({ "index": 0, "quantity": 0 }))
        .await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["product"]["id"], json!(3));

    // Negative also removes
    let (_, body) = client
        .post("/cart/update", &json!({ "index": 0, "quantity": -1 }))
        .await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_remove_item() {
    let mut client = TestClient::new(bundled_app().await);

    client.post("/cart/add", &json!({ "product_id": 1 })).await;
    client.post("/cart/add", &json!({ "product_id": 4 })).await;

    let (_, body) = client.post("/cart/remove", &json!({ "index": 0 })).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["index"], json!(0));
    assert_eq!(body["items"][0]["product"]["id"], json!(4));

    let (status, body) = client.post("/cart/remove", &json!({ "index": 3 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], json!(1));
}

#[tokio::test]
async fn test_clear_cart() {
    let mut client = TestClient::new(bundled_app().await);

    client.post("/cart/add", &json!({ "product_id": 1 })).await;
    client.post("/cart/add", &json!({ "product_id": 2 })).await;

    let (_, body) = client.post("/cart/clear", &json!({})).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(decimal(&body["total_price"]), Decimal::ZERO);

    let (_, body) = client.get("/cart/count").await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let app = bundled_app().await;
    let mut alice = TestClient::new(app.clone());
    let mut bob = TestClient::new(app);

    alice.post("/cart/add", &json!({ "product_id": 1 })).await;
    alice.post("/cart/add", &json!({ "product_id": 1 })).await;
    bob.post("/cart/add", &json!({ "product_id": 2 })).await;

    let (_, body) = alice.get("/cart/count").await;
    assert_eq!(body["count"], json!(2));
    let (_, body) = bob.get("/cart/count").await;
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let mut client = TestClient::new(bundled_app().await);

    let (status, _) = client
        .post("/cart/add", &json!({ "product_id": "abc" }))
        .await;
    assert!(status.is_client_error());
}
