//! Domain models for the storefront API.
//!
//! Row types derive `sqlx::FromRow` and are read with runtime-checked queries.
//! View types shape the JSON returned to the frontend.

pub mod catalog;
pub mod coupon;
pub mod seller;
pub mod session;
pub mod toast;
pub mod user;

pub use session::CurrentUser;
pub use toast::{Toast, ToastKind};
pub use user::User;
