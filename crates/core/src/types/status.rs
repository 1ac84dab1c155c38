//! Enumerated values stored on seller and coupon records.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of an enum's accepted labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?} (expected one of: {expected})")]
pub struct InvalidEnumValue {
    /// Name of the enumerated field.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Accepted labels, comma separated.
    pub expected: &'static str,
}

/// Verification state of a seller's business details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.verification_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    const LABELS: &'static str = "pending, verified, rejected";

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(InvalidEnumValue {
                kind: "verification status",
                value: s.to_owned(),
                expected: Self::LABELS,
            }),
        }
    }
}

/// Primary category a seller store trades in.
///
/// Labels are shown to users verbatim, so they keep their display casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "shop.store_category"))]
pub enum StoreCategory {
    Electronics,
    Fashion,
    #[serde(rename = "Home & Kitchen")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "Home & Kitchen"))]
    HomeAndKitchen,
    #[serde(rename = "Beauty & Personal Care")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "Beauty & Personal Care"))]
    BeautyAndPersonalCare,
    Grocery,
    Mobiles,
    Other,
}

impl StoreCategory {
    /// Every accepted category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Electronics,
        Self::Fashion,
        Self::HomeAndKitchen,
        Self::BeautyAndPersonalCare,
        Self::Grocery,
        Self::Mobiles,
        Self::Other,
    ];

    const LABELS: &'static str =
        "Electronics, Fashion, Home & Kitchen, Beauty & Personal Care, Grocery, Mobiles, Other";

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Fashion => "Fashion",
            Self::HomeAndKitchen => "Home & Kitchen",
            Self::BeautyAndPersonalCare => "Beauty & Personal Care",
            Self::Grocery => "Grocery",
            Self::Mobiles => "Mobiles",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for StoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for StoreCategory {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| InvalidEnumValue {
                kind: "store category",
                value: s.to_owned(),
                expected: Self::LABELS,
            })
    }
}

/// How a coupon's value is applied to the cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.discount_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `value` is a percentage of the cart total.
    Percentage,
    /// `value` is a fixed amount off the cart total.
    Flat,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_status_accepts_only_known_values() {
        for status in ["pending", "verified", "rejected"] {
            let parsed: VerificationStatus = status.parse().unwrap();
            assert_eq!(parsed.as_str(), status);
        }

        for bad in ["approved", "Pending", "", "verified "] {
            assert!(bad.parse::<VerificationStatus>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_verification_status_default_is_pending() {
        assert_eq!(VerificationStatus::default(), VerificationStatus::Pending);
    }

    #[test]
    fn test_verification_status_rejects_unknown_json() {
        let result: Result<VerificationStatus, _> = serde_json::from_str("\"approved\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_store_category_labels_round_trip() {
        for category in StoreCategory::ALL {
            assert_eq!(category.label().parse::<StoreCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_store_category_rejects_unlisted_label() {
        let err = "Toys".parse::<StoreCategory>().unwrap_err();
        assert_eq!(err.kind, "store category");
        assert!(err.to_string().contains("Home & Kitchen"));
    }

    #[test]
    fn test_store_category_serde_uses_display_labels() {
        let json = serde_json::to_string(&StoreCategory::HomeAndKitchen).unwrap();
        assert_eq!(json, "\"Home & Kitchen\"");
        let parsed: StoreCategory = serde_json::from_str("\"Beauty & Personal Care\"").unwrap();
        assert_eq!(parsed, StoreCategory::BeautyAndPersonalCare);
    }

    #[test]
    fn test_discount_type_serde() {
        let parsed: DiscountType = serde_json::from_str("\"flat\"").unwrap();
        assert_eq!(parsed, DiscountType::Flat);
        assert_eq!(DiscountType::Percentage.to_string(), "percentage");
    }
}
