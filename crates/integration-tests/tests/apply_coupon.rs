//! Integration tests for `POST /api/apply-coupon`.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database
//! - The storefront server running (cargo run -p flipzokart-storefront)
//!
//! Run with: cargo test -p flipzokart-integration-tests -- --ignored

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use flipzokart_integration_tests::{admin_client, base_url, client, post_json, unique};
use flipzokart_storefront::client::ApiClient;

async fn create_coupon(body: serde_json::Value) -> String {
    let admin = admin_client().await;
    let (status, created) = post_json(&admin, "/api/admin/coupons", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created["coupon"]["code"]
        .as_str()
        .expect("coupon code in response")
        .to_owned()
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_percentage_coupon_is_capped() {
    let code = create_coupon(json!({
        "code": unique("pct"),
        "discountType": "percentage",
        "value": 50,
        "maxDiscount": 200,
    }))
    .await;

    let api = ApiClient::new(&base_url());
    let body = api
        .apply_coupon(&code.to_lowercase(), Decimal::from(1000))
        .await
        .expect("apply failed");

    assert_eq!(body["success"], true);
    assert_eq!(body["discount"], 200.0);
    assert_eq!(body["finalAmount"], 800.0);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_minimum_order_is_reported() {
    let code = create_coupon(json!({
        "code": unique("min"),
        "discountType": "flat",
        "value": 100,
        "minAmount": 499,
    }))
    .await;

    let api = ApiClient::new(&base_url());
    let body = api
        .apply_coupon(&code, Decimal::from(300))
        .await
        .expect("apply failed");

    assert_eq!(
        body,
        json!({ "success": false, "message": "Minimum order ₹499 required" })
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_unknown_and_missing_fields() {
    let client = client();

    let (status, body) = post_json(
        &client,
        "/api/apply-coupon",
        &json!({ "code": "NO-SUCH-CODE", "cartTotal": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid coupon code");

    let (status, body) =
        post_json(&client, "/api/apply-coupon", &json!({ "cartTotal": 100 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing data");

    let (status, body) = post_json(
        &client,
        "/api/apply-coupon",
        &json!({ "code": "X", "cartTotal": "lots" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid cartTotal");
}
