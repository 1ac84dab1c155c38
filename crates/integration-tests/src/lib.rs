//! Integration tests for Flipzokart.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and start the server
//! cargo run -p flipzokart-cli -- migrate
//! cargo run -p flipzokart-storefront
//!
//! # Run integration tests
//! cargo test -p flipzokart-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_TEST_URL` - server under test (default `http://localhost:8000`)
//! - `STOREFRONT_DATABASE_URL` - the same database the server uses, for
//!   promoting test accounts to admin

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::{Client, StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use flipzokart_core::{Email, UserRole};
use flipzokart_storefront::db::UserRepository;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_TEST_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// A client that keeps the session cookie and never follows redirects.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Unique suffix so reruns never collide on unique columns.
#[must_use]
pub fn unique(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &id[..10])
}

/// Connect to the server's database.
pub async fn pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("STOREFRONT_DATABASE_URL").expect("STOREFRONT_DATABASE_URL not set");
    flipzokart_storefront::db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to database")
}

/// Register an account at `path` with a fresh email; returns the email.
pub async fn register(client: &Client, path: &str) -> String {
    let email = format!("{}@example.com", unique("it-"));
    let resp = client
        .post(format!("{}{path}", base_url()))
        .json(&json!({
            "name": "Integration Test",
            "email": email,
            "password": "correct-horse-battery",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);
    email
}

/// Log a client in.
pub async fn login(client: &Client, email: &str) {
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "email": email, "password": "correct-horse-battery" }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);
}

/// A logged-in admin client.
pub async fn admin_client() -> Client {
    let client = client();
    let email = register(&client, "/api/auth/register").await;

    let pool = pool().await;
    let users = UserRepository::new(&pool);
    let user = users
        .get_by_email(&Email::parse(&email).expect("valid email"))
        .await
        .expect("query failed")
        .expect("registered user exists");
    users
        .set_role(user.id, UserRole::Admin)
        .await
        .expect("Failed to promote");
    pool.close().await;

    // Session still carries the old role
    login(&client, &email).await;
    client
}

/// POST JSON and return status and decoded body.
pub async fn post_json(client: &Client, path: &str, body: &Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}{path}", base_url()))
        .json(body)
        .send()
        .await
        .expect("Request failed");
    let status = resp.status();
    (status, resp.json().await.expect("Response was not JSON"))
}
