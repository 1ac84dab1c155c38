//! Integration tests for the seller onboarding flow.
//!
//! Run with: cargo test -p flipzokart-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::json;

use flipzokart_integration_tests::{base_url, client, post_json, register, unique};

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_full_onboarding_promotes_to_seller() {
    let client = client();
    register(&client, "/api/seller/register").await;

    let (status, body) = post_json(
        &client,
        "/api/seller/business",
        &json!({ "gstin": " 27aapfu0939f1zv ", "pan": "aapfu0939f" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nextStep"], 3);
    assert_eq!(body["business"]["gstin"], "27AAPFU0939F1ZV");
    assert_eq!(body["business"]["verificationStatus"], "pending");

    let (status, body) = post_json(
        &client,
        "/api/seller/store",
        &json!({ "storeName": unique("Store "), "category": "Home & Kitchen" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["role"], "seller");

    let profile: serde_json::Value = client
        .get(format!("{}/api/seller/profile", base_url()))
        .send()
        .await
        .expect("Failed to get profile")
        .json()
        .await
        .expect("Profile was not JSON");
    assert_eq!(profile["nextStep"], 4);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_store_name_taken_by_another_seller() {
    let store_name = unique("Taken ");

    let first = client();
    register(&first, "/api/seller/register").await;
    let (status, _) = post_json(
        &first,
        "/api/seller/store",
        &json!({ "storeName": store_name, "category": "Electronics" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The owner may resubmit their own name
    let (status, _) = post_json(
        &first,
        "/api/seller/store",
        &json!({ "storeName": store_name, "category": "Fashion" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let second = client();
    register(&second, "/api/seller/register").await;
    let (status, body) = post_json(
        &second,
        "/api/seller/store",
        &json!({ "storeName": store_name, "category": "Electronics" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Store Name is already taken");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_business_requires_both_tax_ids() {
    let client = client();
    register(&client, "/api/seller/register").await;

    let (status, body) =
        post_json(&client, "/api/seller/business", &json!({ "gstin": "27AAPFU0939F1ZV" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "GSTIN and PAN are required");
}
