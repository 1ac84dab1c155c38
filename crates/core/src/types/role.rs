//! User roles.

use serde::{Deserialize, Serialize};

/// Role of a marketplace account.
///
/// A seller account starts as `PendingSeller` and becomes `Seller` once the
/// store setup step is complete. `Admin` is granted out-of-band through the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular customer.
    #[default]
    User,
    /// Full access to the admin API.
    Admin,
    /// Seller with a completed store.
    Seller,
    /// Seller still going through onboarding.
    PendingSeller,
}

impl UserRole {
    /// Whether this role may use the seller onboarding endpoints.
    #[must_use]
    pub const fn is_seller(self) -> bool {
        matches!(self, Self::Seller | Self::PendingSeller)
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Seller => "seller",
            Self::PendingSeller => "pending_seller",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            "pending_seller" => Ok(Self::PendingSeller),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(
            "pending_seller".parse::<UserRole>().unwrap(),
            UserRole::PendingSeller
        );
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_seller_roles() {
        assert!(UserRole::Seller.is_seller());
        assert!(UserRole::PendingSeller.is_seller());
        assert!(!UserRole::Admin.is_seller());
        assert!(!UserRole::User.is_seller());
    }

    #[test]
    fn test_role_serde_matches_display() {
        let json = serde_json::to_string(&UserRole::PendingSeller).unwrap();
        assert_eq!(json, "\"pending_seller\"");
        assert_eq!(UserRole::PendingSeller.to_string(), "pending_seller");
    }
}
