//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Password hashing and username/password login

pub mod auth;
