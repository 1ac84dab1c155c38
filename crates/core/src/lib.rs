//! Flipzokart Core - Shared types library.
//!
//! This crate provides common types used across all Flipzokart components:
//! - `storefront` - Customer, seller and admin HTTP API
//! - `cli` - Command-line tools for migrations and role management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, tax identifiers, slugs and enums
//! - [`format`] - Human-readable date formatting with `N/A` / `Invalid Date` sentinels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod types;

pub use types::*;
