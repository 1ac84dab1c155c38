//! Coupon records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use flipzokart_core::format::format_timestamp_date;
use flipzokart_core::{CouponId, DiscountType};

/// A discount code.
#[derive(Debug, Clone, FromRow)]
pub struct Coupon {
    pub id: CouponId,
    /// Upper-case code customers type in.
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    /// Minimum cart total for the coupon to apply.
    pub min_amount: Decimal,
    /// Cap on percentage discounts; zero means uncapped.
    pub max_discount: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponView {
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub min_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_discount: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    pub expires_display: String,
    pub active: bool,
    pub created_display: String,
}

impl From<&Coupon> for CouponView {
    fn from(coupon: &Coupon) -> Self {
        Self {
            id: coupon.id,
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            value: coupon.value,
            min_amount: coupon.min_amount,
            max_discount: coupon.max_discount,
            expires_at: coupon.expires_at,
            expires_display: format_timestamp_date(coupon.expires_at),
            active: coupon.active,
            created_display: format_timestamp_date(Some(coupon.created_at)),
        }
    }
}

/// Coupon counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct CouponStats {
    pub total: i64,
    pub active: i64,
}
