//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `STOREFRONT_BASE_URL` - Public URL for the API server
//! - `STOREFRONT_SESSION_SECRET` - Cookie signing secret (min 64 chars, high entropy)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 8000)
//! - `STOREFRONT_UPLOADS_DIR` - Directory served under `/uploads` (default: uploads)
//! - `STOREFRONT_AUTH_REDIRECT` - Where unauthenticated page requests are sent (default: /signup)
//! - `FRONTEND_ORIGINS` - Comma-separated CORS origins (default: <http://localhost:3000>)
//! - `IMAGE_REMOTE_HOSTS` - Comma-separated `scheme://host` image allowlist
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling (default: 1.0 / 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Cookie signing keys must be at least 64 bytes.
const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Image hosts accepted when `IMAGE_REMOTE_HOSTS` is not set.
pub const DEFAULT_IMAGE_HOSTS: &[&str] = &[
    "https://cdn.ailandingpage.ai",
    "https://images.unsplash.com",
    "https://rukminim1.flixcart.com",
    "https://lh3.googleusercontent.com",
    "https://res.cloudinary.com",
    "https://picsum.photos",
    "https://via.placeholder.com",
    "https://flipzokart-backend.onrender.com",
    "http://localhost",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the API server
    pub base_url: String,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Directory served under `/uploads`
    pub uploads_dir: PathBuf,
    /// Path unauthenticated page requests are redirected to
    pub auth_redirect_path: String,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Hosts that catalog image URLs may point at
    pub image_hosts: ImageHostPolicy,
    /// Key rate limits on `X-Forwarded-For` / `X-Real-IP` instead of the peer
    /// address. Only enable behind a proxy that overwrites both headers.
    pub trust_proxy_headers: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let session_secret = get_validated_secret("STOREFRONT_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "STOREFRONT_SESSION_SECRET")?;

        let uploads_dir = PathBuf::from(get_env_or_default("STOREFRONT_UPLOADS_DIR", "uploads"));
        let auth_redirect_path = get_env_or_default("STOREFRONT_AUTH_REDIRECT", "/signup");
        if !auth_redirect_path.starts_with('/') {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_AUTH_REDIRECT".to_string(),
                "must be an absolute path".to_string(),
            ));
        }

        let cors_origins = split_list(&get_env_or_default(
            "FRONTEND_ORIGINS",
            "http://localhost:3000",
        ));

        let image_hosts = match get_optional_env("IMAGE_REMOTE_HOSTS") {
            Some(raw) => ImageHostPolicy::parse_list(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("IMAGE_REMOTE_HOSTS".to_string(), e))?,
            None => ImageHostPolicy::default(),
        };

        let trust_proxy_headers = get_flag("STOREFRONT_TRUST_PROXY_HEADERS")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            uploads_dir,
            auth_redirect_path,
            cors_origins,
            image_hosts,
            trust_proxy_headers,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Image Host Policy
// =============================================================================

/// A `scheme://host` pair that catalog images may be served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteImageHost {
    pub scheme: String,
    pub host: String,
}

/// Allowlist of remote hosts for icon and banner URLs.
///
/// Relative paths (e.g. `/uploads/icons/tv.png`) and empty values are always
/// accepted; absolute URLs must match an allowed scheme and host exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostPolicy {
    hosts: Vec<RemoteImageHost>,
}

impl Default for ImageHostPolicy {
    fn default() -> Self {
        Self {
            hosts: DEFAULT_IMAGE_HOSTS
                .iter()
                .filter_map(|entry| parse_host_entry(entry).ok())
                .collect(),
        }
    }
}

impl ImageHostPolicy {
    /// Parse a comma-separated list of `scheme://host` entries.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed entry.
    pub fn parse_list(raw: &str) -> Result<Self, String> {
        let hosts = split_list(raw)
            .iter()
            .map(|entry| parse_host_entry(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { hosts })
    }

    /// Allowed hosts, in configuration order.
    #[must_use]
    pub fn hosts(&self) -> &[RemoteImageHost] {
        &self.hosts
    }

    /// Whether an image URL may be stored on a catalog record.
    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return true;
        }
        if value.starts_with('/') && !value.starts_with("//") {
            return true;
        }
        let Ok(url) = Url::parse(value) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        self.hosts
            .iter()
            .any(|allowed| allowed.scheme == url.scheme() && allowed.host == host)
    }
}

fn parse_host_entry(entry: &str) -> Result<RemoteImageHost, String> {
    let url = Url::parse(entry).map_err(|e| format!("{entry}: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("{entry}: scheme must be http or https"));
    }
    let host = url
        .host_str()
        .ok_or_else(|| format!("{entry}: missing host"))?;
    Ok(RemoteImageHost {
        scheme: url.scheme().to_owned(),
        host: host.to_owned(),
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Split a comma-separated list, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a boolean flag, `false` when unset.
fn get_flag(key: &str) -> Result<bool, ConfigError> {
    match get_optional_env(key).as_deref().map(str::trim) {
        None => Ok(false),
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            ConfigError::InvalidEnvVar(key.to_string(), format!("not a boolean: {raw}"))
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get a sampling rate in `[0.0, 1.0]`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be between 0.0 and 1.0".to_string(),
        ));
    }
    Ok(rate)
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            session_secret: SecretString::from("x".repeat(64)),
            uploads_dir: PathBuf::from("uploads"),
            auth_redirect_path: "/signup".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            image_hosts: ImageHostPolicy::default(),
            trust_proxy_headers: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-session-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"a".repeat(64), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_length() {
        let short = SecretString::from("k".repeat(63));
        assert!(validate_session_secret(&short, "TEST_SESSION").is_err());
        let ok = SecretString::from("k".repeat(64));
        assert!(validate_session_secret(&ok, "TEST_SESSION").is_ok());
    }

    #[test]
    fn test_socket_addr_and_security() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert!(!test_config().trust_proxy_headers);
    }

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(
            split_list(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_default_image_policy_matches_scheme_and_host() {
        let policy = ImageHostPolicy::default();
        assert_eq!(policy.hosts().len(), DEFAULT_IMAGE_HOSTS.len());
        assert!(policy.allows("https://res.cloudinary.com/demo/image/upload/tv.png"));
        assert!(policy.allows("http://localhost:8000/uploads/a.png"));
        assert!(!policy.allows("http://res.cloudinary.com/demo/tv.png"));
        assert!(!policy.allows("https://evil.test/tv.png"));
    }

    #[test]
    fn test_image_policy_accepts_relative_and_empty() {
        let policy = ImageHostPolicy::default();
        assert!(policy.allows(""));
        assert!(policy.allows("/uploads/icons/mobiles.svg"));
        assert!(!policy.allows("//evil.test/x.png"));
        assert!(!policy.allows("uploads/x.png"));
    }

    #[test]
    fn test_image_policy_parse_list() {
        let policy = ImageHostPolicy::parse_list("https://cdn.flipzokart.com, http://localhost").unwrap();
        assert_eq!(policy.hosts().len(), 2);
        assert!(policy.allows("https://cdn.flipzokart.com/banner.webp"));
        assert!(ImageHostPolicy::parse_list("ftp://files.test").is_err());
        assert!(ImageHostPolicy::parse_list("not a url").is_err());
    }
}
