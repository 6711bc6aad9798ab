//! In-memory data for the storefront.
//!
//! Nothing here is persisted. Both stores are built once at startup and handed
//! to [`AppState`](crate::state::AppState); handlers only ever read them.
//!
//! - `users` - The credential store (username → hashed password + email)
//! - `seed` - Hard-coded starting data for the catalog and the user table

pub mod seed;
pub mod users;

pub use seed::{SeedError, seed_catalog, seed_users};
pub use users::UserStore;
