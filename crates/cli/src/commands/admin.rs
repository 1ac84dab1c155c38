//! Admin role management commands.
//!
//! # Usage
//!
//! ```bash
//! # Promote an existing account (defaults to admin@flipzokart.com)
//! fz-cli admin promote -e someone@example.com
//!
//! # Create a new admin who can log in
//! fz-cli admin create -e admin@example.com -n "Admin Name" -p 'long-password'
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use flipzokart_core::{Email, UserRole};
use flipzokart_storefront::db::UserRepository;
use flipzokart_storefront::db::users::NewUser;
use flipzokart_storefront::services::auth::Registration;
use flipzokart_storefront::services::{AuthError, AuthService};

use super::{DATABASE_URL_VAR, database_url};

/// Account promoted when no email is given.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@flipzokart.com";

/// Password hash stored for accounts created by `promote`. It never parses,
/// so the account cannot log in until a password is set.
const LOCKED_PASSWORD_HASH: &str = "!";

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository query failed.
    #[error("Database error: {0}")]
    Repository(#[from] flipzokart_storefront::db::RepositoryError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// No account with this email.
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Account creation rejected.
    #[error("Could not create admin: {0}")]
    Auth(#[from] AuthError),
}

/// What `promote` has to do for an account in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStep {
    AlreadyAdmin,
    Promote { from: UserRole },
    Create,
    Missing,
}

/// Decide the promotion step from the account's current role.
#[must_use]
pub const fn promotion_step(current: Option<UserRole>, create_if_missing: bool) -> PromotionStep {
    match current {
        Some(UserRole::Admin) => PromotionStep::AlreadyAdmin,
        Some(from) => PromotionStep::Promote { from },
        None if create_if_missing => PromotionStep::Create,
        None => PromotionStep::Missing,
    }
}

/// Give the account with `email` the admin role.
///
/// With `create_name`, a missing account is created as a password-less
/// admin. The connection pool is closed whether or not this succeeds.
///
/// # Errors
///
/// Returns `AdminError::UserNotFound` if there is no such account and
/// creation was not requested.
pub async fn promote(email: &str, create_name: Option<&str>) -> Result<(), AdminError> {
    let email = Email::parse(email).map_err(|_| AdminError::InvalidEmail(email.to_owned()))?;
    let url = database_url().ok_or(AdminError::MissingEnvVar(DATABASE_URL_VAR))?;
    let pool = flipzokart_storefront::db::create_pool(&url).await?;

    let result = promote_with(&pool, &email, create_name).await;
    pool.close().await;
    result
}

async fn promote_with(
    pool: &PgPool,
    email: &Email,
    create_name: Option<&str>,
) -> Result<(), AdminError> {
    let users = UserRepository::new(pool);
    let user = users.get_by_email(email).await?;

    match promotion_step(user.as_ref().map(|u| u.role), create_name.is_some()) {
        PromotionStep::AlreadyAdmin => {
            tracing::info!(%email, "Already an admin");
        }
        PromotionStep::Promote { from } => {
            if let Some(user) = user {
                users.set_role(user.id, UserRole::Admin).await?;
            }
            tracing::info!(%email, previous_role = %from, "Promoted to admin");
        }
        PromotionStep::Create => {
            let user = users
                .create(&NewUser {
                    name: create_name.unwrap_or("Admin User"),
                    email,
                    phone: None,
                    password_hash: LOCKED_PASSWORD_HASH,
                    role: UserRole::Admin,
                })
                .await?;
            tracing::info!(%email, user_id = %user.id, "Created new admin user");
            tracing::warn!("The account has no password; use 'admin create' for a login-ready admin");
        }
        PromotionStep::Missing => {
            tracing::warn!(%email, "User not found");
            return Err(AdminError::UserNotFound(email.to_string()));
        }
    }

    Ok(())
}

/// Create a new admin user who can log in with `password`.
///
/// # Errors
///
/// Returns `AdminError::Auth` for invalid input or an existing account.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
    phone: Option<&str>,
) -> Result<(), AdminError> {
    let url = database_url().ok_or(AdminError::MissingEnvVar(DATABASE_URL_VAR))?;
    let pool = flipzokart_storefront::db::create_pool(&url).await?;

    let result = AuthService::new(&pool)
        .register(
            Registration {
                name,
                email,
                phone,
                password,
            },
            UserRole::Admin,
        )
        .await;
    pool.close().await;
    let user = result?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_step() {
        assert_eq!(
            promotion_step(Some(UserRole::Admin), false),
            PromotionStep::AlreadyAdmin
        );
        assert_eq!(
            promotion_step(Some(UserRole::Seller), false),
            PromotionStep::Promote {
                from: UserRole::Seller
            }
        );
        assert_eq!(promotion_step(None, true), PromotionStep::Create);
        assert_eq!(promotion_step(None, false), PromotionStep::Missing);
    }
}
