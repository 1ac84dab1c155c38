//! Seller verification review.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use flipzokart_core::{SellerBusinessId, VerificationStatus};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::seller::SellerBusinessView;
use crate::services::{SellerError, SellerService};
use crate::state::AppState;

use super::json_body;

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

fn parse_status(raw: &str) -> std::result::Result<VerificationStatus, SellerError> {
    Ok(raw.trim().parse()?)
}

#[instrument(skip(state, _admin))]
pub async fn businesses(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Value>> {
    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_status)
        .transpose()?;

    let rows = SellerService::new(state.pool())
        .list_businesses(status)
        .await?;
    let businesses: Vec<SellerBusinessView> = rows.iter().map(SellerBusinessView::from).collect();

    Ok(Json(json!({ "success": true, "businesses": businesses })))
}

#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<SellerBusinessId>,
    body: std::result::Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Value>> {
    let status = parse_status(&json_body(body)?.status)?;
    let business = SellerService::new(state.pool())
        .set_verification_status(id, status)
        .await?;

    Ok(Json(json!({
        "success": true,
        "business": SellerBusinessView::from(&business),
    })))
}
