//! Coupon repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use flipzokart_core::{CouponId, DiscountType};

use super::RepositoryError;
use crate::models::coupon::{Coupon, CouponStats};

const COUPON_COLUMNS: &str = "id, code, discount_type, value, min_amount, max_discount, expires_at, active, created_at, updated_at";

/// Conflict message reported when a coupon code is reused.
pub const CODE_TAKEN: &str = "Coupon code already exists";

/// A coupon to be created. `code` must already be normalized.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_amount: Decimal,
    pub max_discount: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

/// Repository for coupon database operations.
pub struct CouponRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CouponRepository<'a> {
    /// Create a new coupon repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find an active coupon by its normalized code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_active_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM shop.coupon WHERE code = $1 AND active"
        ))
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(coupon)
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewCoupon) -> Result<Coupon, RepositoryError> {
        sqlx::query_as::<_, Coupon>(&format!(
            r"
            INSERT INTO shop.coupon
                (code, discount_type, value, min_amount, max_discount, expires_at, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COUPON_COLUMNS}
            "
        ))
        .bind(&new.code)
        .bind(new.discount_type)
        .bind(new.value)
        .bind(new.min_amount)
        .bind(new.max_discount)
        .bind(new.expires_at)
        .bind(new.active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique(e, &[("coupon_code_key", CODE_TAKEN)], CODE_TAKEN))
    }

    /// List all coupons, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let coupons = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM shop.coupon ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(coupons)
    }

    /// Count all and active coupons.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<CouponStats, RepositoryError> {
        let stats = sqlx::query_as::<_, CouponStats>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE active) AS active
            FROM shop.coupon
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(stats)
    }

    /// Enable or disable a coupon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the coupon does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_active(&self, id: CouponId, active: bool) -> Result<Coupon, RepositoryError> {
        sqlx::query_as::<_, Coupon>(&format!(
            "UPDATE shop.coupon SET active = $2 WHERE id = $1 RETURNING {COUPON_COLUMNS}"
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the coupon does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CouponId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.coupon WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
