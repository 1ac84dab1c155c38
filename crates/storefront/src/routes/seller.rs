//! Seller onboarding handlers.
//!
//! ```text
//! POST /api/seller/register  - step 1: account (pending_seller)
//! POST /api/seller/business  - step 2: GSTIN and PAN
//! POST /api/seller/store     - step 3: store; promotes to seller
//! GET  /api/seller/profile   - what has been submitted so far
//! ```

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use flipzokart_core::UserRole;

use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::seller::{SellerBusinessView, SellerStoreView};
use crate::models::user::UserView;
use crate::services::sellers::StoreForm;
use crate::services::{AuthService, SellerService};
use crate::state::AppState;

use super::auth::{RegisterBody, start_session};

/// Step 2 body.
#[derive(Debug, Deserialize)]
pub struct BusinessBody {
    #[serde(default)]
    pub gstin: String,
    #[serde(default)]
    pub pan: String,
}

/// Step 3 body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBody {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub category: String,
    pub store_description: Option<String>,
}

/// Create a seller account awaiting onboarding and log it in.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .register(body.registration(), UserRole::PendingSeller)
        .await?;
    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Seller account created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Seller account created",
            "user": UserView::from(&user),
            "nextStep": 2,
        })),
    ))
}

/// Save business verification details.
#[instrument(skip(state, seller, body), fields(seller_id = %seller.id))]
pub async fn business(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Json(body): Json<BusinessBody>,
) -> Result<Json<Value>> {
    let business = SellerService::new(state.pool())
        .submit_business(seller.id, &body.gstin, &body.pan)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Business details saved",
        "business": SellerBusinessView::from(&business),
        "nextStep": 3,
    })))
}

/// Set up the store and finish onboarding.
///
/// The session is rewritten so the new `seller` role is visible immediately.
#[instrument(skip(state, session, seller, body), fields(seller_id = %seller.id))]
pub async fn store(
    State(state): State<AppState>,
    session: Session,
    RequireSeller(seller): RequireSeller,
    Json(body): Json<StoreBody>,
) -> Result<Json<Value>> {
    let store = SellerService::new(state.pool())
        .setup_store(
            seller.id,
            StoreForm {
                store_name: &body.store_name,
                category: &body.category,
                store_description: body.store_description.as_deref(),
            },
        )
        .await?;

    let user = AuthService::new(state.pool()).get_user(seller.id).await?;
    start_session(&session, &user).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Store setup complete",
        "store": SellerStoreView::from(&store),
        "user": UserView::from(&user),
    })))
}

/// Business and store submitted by the current seller.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn profile(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<Json<Value>> {
    let profile = SellerService::new(state.pool()).profile(seller.id).await?;

    Ok(Json(json!({
        "success": true,
        "nextStep": profile.next_step(),
        "business": profile.business,
        "store": profile.store,
    })))
}
