//! Public coupon application.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::services::coupons::CouponQuote;
use crate::services::{CouponError, CouponRejection, CouponService};
use crate::state::AppState;

/// Successful apply response.
#[derive(Debug, Serialize)]
pub struct AppliedCoupon {
    pub success: bool,
    #[serde(flatten)]
    pub quote: CouponQuote,
}

/// Apply a coupon code to a cart total.
///
/// Body: `{code, cartTotal}`. Responds `{success, discount, finalAmount}`.
/// An unreadable body is treated like one with no fields.
#[instrument(skip(state, body))]
pub async fn apply(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<AppliedCoupon>> {
    let Ok(Json(body)) = body else {
        return Err(CouponError::from(CouponRejection::MissingData).into());
    };

    let quote = CouponService::new(state.pool())
        .apply(body.get("code"), body.get("cartTotal"))
        .await?;

    Ok(Json(AppliedCoupon {
        success: true,
        quote,
    }))
}
