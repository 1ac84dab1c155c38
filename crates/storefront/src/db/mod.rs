//! Database operations for the marketplace `PostgreSQL` database.
//!
//! # Schema: `shop`
//!
//! ## Tables
//!
//! - `user` - Customer, seller and admin accounts
//! - `seller_business` - GSTIN/PAN verification record (one per seller)
//! - `seller_store` - Seller storefront details (one per seller, unique name)
//! - `category`, `subcategory`, `submenu` - Catalog navigation tree
//! - `coupon` - Discount codes
//! - `tower_sessions.session` - Tower-sessions storage (created at startup)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p flipzokart-cli -- migrate
//! ```

pub mod catalog;
pub mod coupons;
pub mod sellers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use coupons::CouponRepository;
pub use sellers::SellerRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to `Conflict`, keyed by constraint name.
    ///
    /// `messages` pairs constraint names with the conflict message to report.
    /// Unique violations on unlisted constraints use `fallback`.
    pub(crate) fn from_unique(
        err: sqlx::Error,
        messages: &[(&str, &str)],
        fallback: &str,
    ) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            let message = db_err
                .constraint()
                .and_then(|name| {
                    messages
                        .iter()
                        .find(|(constraint, _)| *constraint == name)
                        .map(|(_, message)| *message)
                })
                .unwrap_or(fallback);
            return Self::Conflict(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Check that the database answers a trivial query.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = RepositoryError::from_unique(
            sqlx::Error::RowNotFound,
            &[("coupon_code_key", "coupon code already exists")],
            "duplicate",
        );
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }
}
