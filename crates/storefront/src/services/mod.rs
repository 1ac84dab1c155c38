//! Business logic services.
//!
//! Services sit between route handlers and repositories. Each owns its
//! validation rules and error type.

pub mod auth;
pub mod catalog;
pub mod coupons;
pub mod sellers;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogError, CatalogService, NavigationCache};
pub use coupons::{CouponError, CouponRejection, CouponService};
pub use sellers::{SellerError, SellerService};
