//! Coupon evaluation and management.
//!
//! The discount arithmetic in [`evaluate`] is pure; [`CouponService`] wraps it
//! with the lookup and the admin operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;

use flipzokart_core::{CouponId, DiscountType};

use crate::db::RepositoryError;
use crate::db::coupons::{CouponRepository, NewCoupon};
use crate::models::coupon::{Coupon, CouponStats};

/// Why a coupon could not be applied. The display text is shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponRejection {
    #[error("Missing data")]
    MissingData,
    #[error("Invalid cartTotal")]
    InvalidCartTotal,
    #[error("Invalid coupon code")]
    InvalidCode,
    #[error("Coupon expired")]
    Expired,
    #[error("Minimum order ₹{} required", .minimum.normalize())]
    BelowMinimum { minimum: Decimal },
}

/// Errors from coupon operations.
#[derive(Debug, Error)]
pub enum CouponError {
    #[error(transparent)]
    Rejected(#[from] CouponRejection),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of applying a coupon to a cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
}

/// Admin input for a new coupon.
#[derive(Debug, Clone)]
pub struct CouponDraft {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

/// Canonical form of a coupon code.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Read the code field of an apply request.
///
/// # Errors
///
/// `MissingData` when absent, null or empty; `InvalidCode` when not a string.
pub fn parse_code(code: Option<&Value>) -> Result<String, CouponRejection> {
    match code {
        None | Some(Value::Null) => Err(CouponRejection::MissingData),
        Some(Value::String(s)) if s.is_empty() => Err(CouponRejection::MissingData),
        Some(Value::String(s)) => Ok(normalize_code(s)),
        Some(_) => Err(CouponRejection::InvalidCode),
    }
}

/// Read the cart total field of an apply request.
///
/// Accepts JSON numbers and numeric strings; a blank string counts as zero.
///
/// # Errors
///
/// `MissingData` when absent or null; `InvalidCartTotal` otherwise.
pub fn parse_cart_total(total: Option<&Value>) -> Result<Decimal, CouponRejection> {
    match total {
        None | Some(Value::Null) => Err(CouponRejection::MissingData),
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        Some(_) => Err(CouponRejection::InvalidCartTotal),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, CouponRejection> {
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| CouponRejection::InvalidCartTotal)
}

/// Apply a coupon to a cart total at time `now`.
///
/// # Errors
///
/// Returns `Expired` if the coupon's expiry is before `now`,
/// `BelowMinimum` if the cart total is under the coupon minimum, or
/// `InvalidCartTotal` if the arithmetic leaves the `Decimal` range.
pub fn evaluate(
    coupon: &Coupon,
    cart_total: Decimal,
    now: DateTime<Utc>,
) -> Result<CouponQuote, CouponRejection> {
    if coupon.expires_at.is_some_and(|expiry| expiry < now) {
        return Err(CouponRejection::Expired);
    }
    if cart_total < coupon.min_amount {
        return Err(CouponRejection::BelowMinimum {
            minimum: coupon.min_amount,
        });
    }

    let discount = match coupon.discount_type {
        DiscountType::Percentage => {
            let raw = cart_total
                .checked_mul(coupon.value)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .ok_or(CouponRejection::InvalidCartTotal)?;
            if coupon.max_discount > Decimal::ZERO {
                raw.min(coupon.max_discount)
            } else {
                raw
            }
        }
        DiscountType::Flat => coupon.value,
    };

    let final_amount = cart_total
        .checked_sub(discount)
        .ok_or(CouponRejection::InvalidCartTotal)?
        .max(Decimal::ZERO);

    Ok(CouponQuote {
        discount,
        final_amount,
    })
}

/// Validate an admin draft into a row to insert.
///
/// # Errors
///
/// Returns `CouponError::Invalid` describing the first invalid field.
pub fn validate_draft(draft: CouponDraft) -> Result<NewCoupon, CouponError> {
    let code = normalize_code(&draft.code);
    if code.is_empty() {
        return Err(CouponError::Invalid("Coupon code is required".to_owned()));
    }
    if draft.value < Decimal::ZERO {
        return Err(CouponError::Invalid("Value cannot be negative".to_owned()));
    }
    if draft.discount_type == DiscountType::Percentage && draft.value > Decimal::ONE_HUNDRED {
        return Err(CouponError::Invalid(
            "Percentage value cannot exceed 100".to_owned(),
        ));
    }
    let min_amount = draft.min_amount.unwrap_or(Decimal::ZERO);
    let max_discount = draft.max_discount.unwrap_or(Decimal::ZERO);
    if min_amount < Decimal::ZERO || max_discount < Decimal::ZERO {
        return Err(CouponError::Invalid(
            "Amounts cannot be negative".to_owned(),
        ));
    }
    for amount in [draft.value, min_amount, max_discount] {
        check_amount(amount)?;
    }

    Ok(NewCoupon {
        code,
        discount_type: draft.discount_type,
        value: draft.value,
        min_amount,
        max_discount,
        expires_at: draft.expires_at,
        active: draft.active.unwrap_or(true),
    })
}

/// Amounts are stored as `NUMERIC(12, 2)`.
const MAX_AMOUNT_SCALE: u32 = 2;

/// Smallest amount that no longer fits the column.
fn amount_limit() -> Decimal {
    Decimal::from(10_000_000_000_i64)
}

fn check_amount(amount: Decimal) -> Result<(), CouponError> {
    if amount >= amount_limit() {
        return Err(CouponError::Invalid(
            "Amounts must be below 10000000000".to_owned(),
        ));
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(CouponError::Invalid(
            "Amounts can have at most 2 decimal places".to_owned(),
        ));
    }
    Ok(())
}

/// Coupon service.
pub struct CouponService<'a> {
    coupons: CouponRepository<'a>,
}

impl<'a> CouponService<'a> {
    /// Create a new coupon service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            coupons: CouponRepository::new(pool),
        }
    }

    /// Apply a coupon code to a cart total from a raw request body.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Rejected` for any customer-facing refusal and
    /// `CouponError::Repository` if the lookup fails.
    pub async fn apply(
        &self,
        code: Option<&Value>,
        cart_total: Option<&Value>,
    ) -> Result<CouponQuote, CouponError> {
        let code_missing = match code {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if code_missing || matches!(cart_total, None | Some(Value::Null)) {
            return Err(CouponRejection::MissingData.into());
        }
        let cart_total = parse_cart_total(cart_total)?;
        let code = parse_code(code)?;

        let coupon = self
            .coupons
            .find_active_by_code(&code)
            .await?
            .ok_or(CouponRejection::InvalidCode)?;

        Ok(evaluate(&coupon, cart_total, Utc::now())?)
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Invalid` for bad input and
    /// `CouponError::Repository` (`Conflict`) for a duplicate code.
    pub async fn create(&self, draft: CouponDraft) -> Result<Coupon, CouponError> {
        let new = validate_draft(draft)?;
        Ok(self.coupons.create(&new).await?)
    }

    /// List all coupons, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Coupon>, CouponError> {
        Ok(self.coupons.list().await?)
    }

    /// Coupon counts.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Repository` if the query fails.
    pub async fn stats(&self) -> Result<CouponStats, CouponError> {
        Ok(self.coupons.stats().await?)
    }

    /// Enable or disable a coupon.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Repository` (`NotFound`) for an unknown coupon.
    pub async fn set_active(&self, id: CouponId, active: bool) -> Result<Coupon, CouponError> {
        Ok(self.coupons.set_active(id, active).await?)
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Repository` (`NotFound`) for an unknown coupon.
    pub async fn delete(&self, id: CouponId) -> Result<(), CouponError> {
        Ok(self.coupons.delete(id).await?)
    }
}
