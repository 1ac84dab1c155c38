//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Account pages
//! GET  /account                              - Guarded account overview
//!
//! # Auth (strict rate limit)
//! POST /api/auth/register                    - Create customer account
//! POST /api/auth/login                       - Password login
//! POST /api/auth/logout                      - End session
//! POST /api/seller/register                  - Create seller account (step 1)
//!
//! # API
//! GET  /api/auth/me                          - Current user
//! GET  /api/account                          - Guarded account overview (JSON)
//! GET  /api/toasts                           - Drain queued toasts
//! POST /api/apply-coupon                     - Apply coupon to cart total
//! GET  /api/categories                       - Active categories
//! GET  /api/categories/{slug}/navigation     - Subcategories and submenus
//! POST /api/seller/business                  - Business details (step 2)
//! POST /api/seller/store                     - Store setup (step 3)
//! GET  /api/seller/profile                   - Onboarding progress
//!
//! # Admin
//! /api/admin/*                               - See [`admin`]
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod catalog;
pub mod coupons;
pub mod seller;
pub mod toasts;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the credential routes router (strict rate limit).
pub fn credential_routes(trust_forwarded: bool) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/seller/register", post(seller::register))
        .layer(auth_rate_limiter(trust_forwarded))
}

/// Create the general API router.
pub fn api_routes(trust_forwarded: bool) -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/account", get(account::index))
        .route("/toasts", get(toasts::drain))
        .route("/apply-coupon", post(coupons::apply))
        .route("/categories", get(catalog::categories))
        .route("/categories/{slug}/navigation", get(catalog::navigation))
        .route("/seller/business", post(seller::business))
        .route("/seller/store", post(seller::store))
        .route("/seller/profile", get(seller::profile))
        .nest("/admin", admin::routes())
        .layer(api_rate_limiter(trust_forwarded))
}

/// Create all routes for the storefront.
///
/// `trust_forwarded` makes the rate limiters key on proxy headers.
pub fn routes(trust_forwarded: bool) -> Router<AppState> {
    Router::new()
        .route("/account", get(account::index))
        .nest(
            "/api",
            credential_routes(trust_forwarded).merge(api_routes(trust_forwarded)),
        )
}
