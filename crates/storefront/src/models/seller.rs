//! Seller onboarding records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use flipzokart_core::format::format_timestamp_date_time;
use flipzokart_core::{
    Gstin, Pan, SellerBusinessId, SellerStoreId, StoreCategory, UserId, VerificationStatus,
};

/// Tax registration details submitted by a seller.
#[derive(Debug, Clone, FromRow)]
pub struct SellerBusiness {
    pub id: SellerBusinessId,
    pub seller_id: UserId,
    pub gstin: Gstin,
    pub pan: Pan,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A seller's storefront.
#[derive(Debug, Clone, FromRow)]
pub struct SellerStore {
    pub id: SellerStoreId,
    pub seller_id: UserId,
    pub store_name: String,
    pub category: StoreCategory,
    pub store_description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Business record joined with the owning account, for admin review.
#[derive(Debug, Clone, FromRow)]
pub struct SellerBusinessWithOwner {
    #[sqlx(flatten)]
    pub business: SellerBusiness,
    pub seller_name: String,
    pub seller_email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerBusinessView {
    pub id: SellerBusinessId,
    pub seller_id: UserId,
    pub gstin: Gstin,
    pub pan: Pan,
    pub verification_status: VerificationStatus,
    pub submitted_display: String,
    pub updated_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_email: Option<String>,
}

impl From<&SellerBusiness> for SellerBusinessView {
    fn from(business: &SellerBusiness) -> Self {
        Self {
            id: business.id,
            seller_id: business.seller_id,
            gstin: business.gstin.clone(),
            pan: business.pan.clone(),
            verification_status: business.verification_status,
            submitted_display: format_timestamp_date_time(Some(business.created_at)),
            updated_display: format_timestamp_date_time(Some(business.updated_at)),
            seller_name: None,
            seller_email: None,
        }
    }
}

impl From<&SellerBusinessWithOwner> for SellerBusinessView {
    fn from(row: &SellerBusinessWithOwner) -> Self {
        Self {
            seller_name: Some(row.seller_name.clone()),
            seller_email: Some(row.seller_email.clone()),
            ..Self::from(&row.business)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerStoreView {
    pub id: SellerStoreId,
    pub seller_id: UserId,
    pub store_name: String,
    pub category: StoreCategory,
    pub store_description: Option<String>,
    pub is_active: bool,
    pub created_display: String,
}

impl From<&SellerStore> for SellerStoreView {
    fn from(store: &SellerStore) -> Self {
        Self {
            id: store.id,
            seller_id: store.seller_id,
            store_name: store.store_name.clone(),
            category: store.category,
            store_description: store.store_description.clone(),
            is_active: store.is_active,
            created_display: format_timestamp_date_time(Some(store.created_at)),
        }
    }
}

/// Everything a seller has submitted so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SellerProfile {
    pub business: Option<SellerBusinessView>,
    pub store: Option<SellerStoreView>,
}

impl SellerProfile {
    /// The onboarding step the seller should see next (1-based, 4 = done).
    #[must_use]
    pub const fn next_step(&self) -> u8 {
        match (&self.business, &self.store) {
            (None, _) => 2,
            (Some(_), None) => 3,
            (Some(_), Some(_)) => 4,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn business() -> SellerBusiness {
        SellerBusiness {
            id: SellerBusinessId::new(1),
            seller_id: UserId::new(7),
            gstin: Gstin::parse("27aapfu0939f1zv").unwrap(),
            pan: Pan::parse("aapfu0939f").unwrap(),
            verification_status: VerificationStatus::Pending,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    #[test]
    fn test_business_view_formats_dates_and_camel_cases() {
        let view = SellerBusinessView::from(&business());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["gstin"], "27AAPFU0939F1ZV");
        assert_eq!(json["verificationStatus"], "pending");
        assert_eq!(json["submittedDisplay"], "Jan 1, 1970, 12:00 AM");
        assert!(json.get("sellerName").is_none());
    }

    #[test]
    fn test_next_step_follows_onboarding_order() {
        let mut profile = SellerProfile::default();
        assert_eq!(profile.next_step(), 2);
        profile.business = Some(SellerBusinessView::from(&business()));
        assert_eq!(profile.next_step(), 3);
    }
}
