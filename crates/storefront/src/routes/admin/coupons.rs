//! Coupon management.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use flipzokart_core::{CouponId, DiscountType};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::coupon::CouponView;
use crate::services::CouponService;
use crate::services::coupons::CouponDraft;
use crate::state::AppState;

use super::json_body;

/// New coupon body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponBody {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

/// Active flag body.
#[derive(Debug, Deserialize)]
pub struct ActiveBody {
    pub active: bool,
}

#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Value>> {
    let coupons = CouponService::new(state.pool()).list().await?;
    let coupons: Vec<CouponView> = coupons.iter().map(CouponView::from).collect();
    Ok(Json(json!({ "success": true, "coupons": coupons })))
}

#[instrument(skip(state, _admin))]
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Value>> {
    let stats = CouponService::new(state.pool()).stats().await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: std::result::Result<Json<CreateCouponBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let body = json_body(body)?;
    let coupon = CouponService::new(state.pool())
        .create(CouponDraft {
            code: body.code,
            discount_type: body.discount_type,
            value: body.value,
            min_amount: body.min_amount,
            max_discount: body.max_discount,
            expires_at: body.expires_at,
            active: body.active,
        })
        .await?;
    tracing::info!(coupon_id = %coupon.id, code = %coupon.code, "Coupon created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "coupon": CouponView::from(&coupon) })),
    ))
}

#[instrument(skip(state, _admin, body))]
pub async fn set_active(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<CouponId>,
    body: std::result::Result<Json<ActiveBody>, JsonRejection>,
) -> Result<Json<Value>> {
    let body = json_body(body)?;
    let coupon = CouponService::new(state.pool())
        .set_active(id, body.active)
        .await?;
    Ok(Json(json!({ "success": true, "coupon": CouponView::from(&coupon) })))
}

#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<CouponId>,
) -> Result<Json<Value>> {
    CouponService::new(state.pool()).delete(id).await?;
    tracing::info!(coupon_id = %id, "Coupon deleted");
    Ok(Json(json!({ "success": true })))
}
