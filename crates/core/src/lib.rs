//! Corner Shop Core - Shared domain library.
//!
//! This crate holds the parts of the shop that never touch I/O:
//! - [`types`] - Newtype wrappers for product IDs, prices, and emails
//! - [`catalog`] - The product catalog and its query operations
//!
//! The storefront binary owns HTTP, sessions, and password hashing; everything
//! here is pure and can be used from tests without a runtime.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::{Catalog, CatalogError, Product};
pub use types::*;
