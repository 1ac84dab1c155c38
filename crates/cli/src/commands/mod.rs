//! CLI command implementations.

pub mod admin;
pub mod migrate;

use secrecy::SecretString;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_VAR: &str = "STOREFRONT_DATABASE_URL";

/// Read the database URL, loading `.env` first.
pub fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();
    std::env::var(DATABASE_URL_VAR).ok().map(SecretString::from)
}
