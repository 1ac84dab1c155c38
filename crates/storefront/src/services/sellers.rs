//! Seller onboarding service.
//!
//! Onboarding is three steps: account (`pending_seller`), business details,
//! then store setup, which promotes the account to `seller`.

use sqlx::PgPool;
use thiserror::Error;

use flipzokart_core::{
    Gstin, InvalidEnumValue, Pan, SellerBusinessId, StoreCategory, TaxIdError, UserId,
    VerificationStatus,
};

use crate::db::RepositoryError;
use crate::db::sellers::{SellerRepository, StoreDetails};
use crate::models::seller::{
    SellerBusiness, SellerBusinessView, SellerBusinessWithOwner, SellerProfile, SellerStore,
    SellerStoreView,
};

/// Errors from seller onboarding.
#[derive(Debug, Error)]
pub enum SellerError {
    #[error("GSTIN and PAN are required")]
    MissingTaxIds,
    #[error("Store Name and Category are required")]
    MissingStoreDetails,
    #[error(transparent)]
    InvalidTaxId(#[from] TaxIdError),
    #[error(transparent)]
    InvalidEnum(#[from] InvalidEnumValue),
    #[error("Store Name is already taken")]
    StoreNameTaken,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Raw store form; category arrives as its display label.
#[derive(Debug, Clone, Copy)]
pub struct StoreForm<'f> {
    pub store_name: &'f str,
    pub category: &'f str,
    pub store_description: Option<&'f str>,
}

/// Seller onboarding service.
pub struct SellerService<'a> {
    sellers: SellerRepository<'a>,
}

impl<'a> SellerService<'a> {
    /// Create a new seller service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            sellers: SellerRepository::new(pool),
        }
    }

    /// Save business details; resubmission resets verification to pending.
    ///
    /// # Errors
    ///
    /// Returns `SellerError::MissingTaxIds` if either identifier is blank.
    pub async fn submit_business(
        &self,
        seller_id: UserId,
        gstin: &str,
        pan: &str,
    ) -> Result<SellerBusiness, SellerError> {
        if gstin.trim().is_empty() || pan.trim().is_empty() {
            return Err(SellerError::MissingTaxIds);
        }
        let gstin = Gstin::parse(gstin)?;
        let pan = Pan::parse(pan)?;

        let business = self.sellers.upsert_business(seller_id, &gstin, &pan).await?;
        tracing::info!(seller_id = %seller_id, business_id = %business.id, "Business details saved");
        Ok(business)
    }

    /// Create or update the seller's store and promote them to `seller`.
    ///
    /// # Errors
    ///
    /// Returns `SellerError::MissingStoreDetails` if name or category is blank,
    /// `SellerError::InvalidEnum` for an unknown category, and
    /// `SellerError::StoreNameTaken` if another seller owns the name.
    pub async fn setup_store(
        &self,
        seller_id: UserId,
        form: StoreForm<'_>,
    ) -> Result<SellerStore, SellerError> {
        let store_name = form.store_name.trim();
        if store_name.is_empty() || form.category.trim().is_empty() {
            return Err(SellerError::MissingStoreDetails);
        }
        let category: StoreCategory = form.category.trim().parse()?;

        if self.sellers.store_name_taken(store_name, seller_id).await? {
            return Err(SellerError::StoreNameTaken);
        }

        let store = self
            .sellers
            .complete_store(
                seller_id,
                &StoreDetails {
                    store_name,
                    category,
                    store_description: form.store_description,
                },
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => SellerError::StoreNameTaken,
                other => SellerError::Repository(other),
            })?;

        tracing::info!(seller_id = %seller_id, store_id = %store.id, "Store setup complete");
        Ok(store)
    }

    /// Business and store of a seller.
    ///
    /// # Errors
    ///
    /// Returns `SellerError::Repository` if a query fails.
    pub async fn profile(&self, seller_id: UserId) -> Result<SellerProfile, SellerError> {
        let business = self.sellers.get_business(seller_id).await?;
        let store = self.sellers.get_store(seller_id).await?;

        Ok(SellerProfile {
            business: business.as_ref().map(SellerBusinessView::from),
            store: store.as_ref().map(SellerStoreView::from),
        })
    }

    /// Business records for admin review, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `SellerError::Repository` if the query fails.
    pub async fn list_businesses(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<SellerBusinessWithOwner>, SellerError> {
        Ok(self.sellers.list_businesses(status).await?)
    }

    /// Record an admin verification decision.
    ///
    /// # Errors
    ///
    /// Returns `SellerError::Repository` (`NotFound`) for an unknown record.
    pub async fn set_verification_status(
        &self,
        id: SellerBusinessId,
        status: VerificationStatus,
    ) -> Result<SellerBusiness, SellerError> {
        let business = self.sellers.set_business_status(id, status).await?;
        tracing::info!(business_id = %id, status = %status, "Verification status updated");
        Ok(business)
    }
}
