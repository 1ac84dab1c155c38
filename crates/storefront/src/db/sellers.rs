//! Seller onboarding repository.
//!
//! Each seller has at most one business record and one store; both are
//! upserted keyed on `seller_id`.

use sqlx::PgPool;

use flipzokart_core::{
    Gstin, Pan, SellerBusinessId, StoreCategory, UserId, UserRole, VerificationStatus,
};

use super::RepositoryError;
use crate::models::seller::{SellerBusiness, SellerBusinessWithOwner, SellerStore};

const BUSINESS_COLUMNS: &str =
    "id, seller_id, gstin, pan, verification_status, created_at, updated_at";
const STORE_COLUMNS: &str = "id, seller_id, store_name, category, store_description, is_active, created_at, updated_at";

/// Conflict message reported when another seller owns the store name.
pub const STORE_NAME_TAKEN: &str = "Store Name is already taken";

/// Store details as submitted during onboarding.
#[derive(Debug, Clone)]
pub struct StoreDetails<'a> {
    pub store_name: &'a str,
    pub category: StoreCategory,
    pub store_description: Option<&'a str>,
}

/// Repository for seller business and store records.
pub struct SellerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SellerRepository<'a> {
    /// Create a new seller repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the business record of a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_business(
        &self,
        seller_id: UserId,
    ) -> Result<Option<SellerBusiness>, RepositoryError> {
        let business = sqlx::query_as::<_, SellerBusiness>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM shop.seller_business WHERE seller_id = $1"
        ))
        .bind(seller_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(business)
    }

    /// Create or replace a seller's business details.
    ///
    /// Resubmission overwrites GSTIN and PAN and puts the record back into
    /// `pending` verification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_business(
        &self,
        seller_id: UserId,
        gstin: &Gstin,
        pan: &Pan,
    ) -> Result<SellerBusiness, RepositoryError> {
        let business = sqlx::query_as::<_, SellerBusiness>(&format!(
            r"
            INSERT INTO shop.seller_business (seller_id, gstin, pan)
            VALUES ($1, $2, $3)
            ON CONFLICT (seller_id) DO UPDATE
                SET gstin = EXCLUDED.gstin,
                    pan = EXCLUDED.pan,
                    verification_status = 'pending'
            RETURNING {BUSINESS_COLUMNS}
            "
        ))
        .bind(seller_id)
        .bind(gstin)
        .bind(pan)
        .fetch_one(self.pool)
        .await?;

        Ok(business)
    }

    /// List business records with their owners, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_businesses(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<SellerBusinessWithOwner>, RepositoryError> {
        let rows = sqlx::query_as::<_, SellerBusinessWithOwner>(
            r"
            SELECT b.id, b.seller_id, b.gstin, b.pan, b.verification_status,
                   b.created_at, b.updated_at,
                   u.name AS seller_name, u.email AS seller_email
            FROM shop.seller_business b
            JOIN shop.user u ON u.id = b.seller_id
            WHERE $1::shop.verification_status IS NULL OR b.verification_status = $1
            ORDER BY b.created_at DESC, b.id DESC
            ",
        )
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Set the verification status of a business record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_business_status(
        &self,
        id: SellerBusinessId,
        status: VerificationStatus,
    ) -> Result<SellerBusiness, RepositoryError> {
        sqlx::query_as::<_, SellerBusiness>(&format!(
            r"
            UPDATE shop.seller_business SET verification_status = $2
            WHERE id = $1
            RETURNING {BUSINESS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Get the store of a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_store(&self, seller_id: UserId) -> Result<Option<SellerStore>, RepositoryError> {
        let store = sqlx::query_as::<_, SellerStore>(&format!(
            "SELECT {STORE_COLUMNS} FROM shop.seller_store WHERE seller_id = $1"
        ))
        .bind(seller_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Whether a seller other than `seller_id` already uses this store name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn store_name_taken(
        &self,
        store_name: &str,
        seller_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let taken: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM shop.seller_store
                WHERE store_name = $1 AND seller_id <> $2
            )
            ",
        )
        .bind(store_name.trim())
        .bind(seller_id)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    /// Create or replace a seller's store and promote the owner to `seller`.
    ///
    /// Both writes happen in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if another seller owns the store name.
    /// Returns `RepositoryError::NotFound` if the seller account does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn complete_store(
        &self,
        seller_id: UserId,
        details: &StoreDetails<'_>,
    ) -> Result<SellerStore, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let store = sqlx::query_as::<_, SellerStore>(&format!(
            r"
            INSERT INTO shop.seller_store (seller_id, store_name, category, store_description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (seller_id) DO UPDATE
                SET store_name = EXCLUDED.store_name,
                    category = EXCLUDED.category,
                    store_description = EXCLUDED.store_description
            RETURNING {STORE_COLUMNS}
            "
        ))
        .bind(seller_id)
        .bind(details.store_name.trim())
        .bind(details.category)
        .bind(
            details
                .store_description
                .map(str::trim)
                .filter(|d| !d.is_empty()),
        )
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            RepositoryError::from_unique(
                e,
                &[("seller_store_store_name_key", STORE_NAME_TAKEN)],
                STORE_NAME_TAKEN,
            )
        })?;

        let promoted = sqlx::query("UPDATE shop.user SET role = $2 WHERE id = $1")
            .bind(seller_id)
            .bind(UserRole::Seller)
            .execute(&mut *tx)
            .await?;
        if promoted.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(store)
    }
}
