//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (frontend origins)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Security headers
//! 7. Rate limiting (governor, per route group)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod toast;

pub use auth::{
    AuthGate, GateDecision, LOGIN_REQUIRED_MESSAGE, OptionalAuth, RequireAdmin, RequireAuth,
    RequireSeller, clear_current_user, set_current_user,
};
pub use rate_limit::{api_rate_limiter, auth_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use toast::{queue_toast, take_toasts};
