//! Admin API. Every handler takes [`RequireAdmin`](crate::middleware::RequireAdmin).
//!
//! ```text
//! GET    /api/admin/coupons                            - List coupons
//! POST   /api/admin/coupons                            - Create coupon
//! GET    /api/admin/coupons/stats                      - Coupon counts
//! PATCH  /api/admin/coupons/{id}                       - Enable/disable
//! DELETE /api/admin/coupons/{id}                       - Delete coupon
//! GET    /api/admin/sellers/businesses?status=         - Business records
//! PATCH  /api/admin/sellers/businesses/{id}/status     - Verification decision
//! POST   /api/admin/categories                         - Create category
//! POST   /api/admin/subcategories                      - Create subcategory
//! POST   /api/admin/submenus                           - Create submenu
//! PATCH  /api/admin/submenus/{id}                      - Update submenu
//! DELETE /api/admin/submenus/{id}                      - Delete submenu
//! ```

pub mod catalog;
pub mod coupons;
pub mod sellers;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, patch, post},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Unwrap a JSON body, reporting a malformed one as a 400.
pub(crate) fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Create the admin API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/coupons", get(coupons::index).post(coupons::create))
        .route("/coupons/stats", get(coupons::stats))
        .route(
            "/coupons/{id}",
            patch(coupons::set_active).delete(coupons::delete),
        )
        .route("/sellers/businesses", get(sellers::businesses))
        .route(
            "/sellers/businesses/{id}/status",
            patch(sellers::set_status),
        )
        .route("/categories", post(catalog::create_category))
        .route("/subcategories", post(catalog::create_subcategory))
        .route("/submenus", post(catalog::create_submenu))
        .route(
            "/submenus/{id}",
            patch(catalog::update_submenu).delete(catalog::delete_submenu),
        )
}
