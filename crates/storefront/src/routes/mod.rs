//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Full catalog
//! GET  /health                 - Health check (added in `app`)
//! GET  /static/*               - Stylesheet and images (added in `app`)
//!
//! # Catalog
//! GET  /product/{id}           - Product detail with related products
//! GET  /search?q=              - Free-text search
//! GET  /category/{name}        - Category listing
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /logout                 - Logout action (requires auth)
//! GET  /profile                - Profile page (requires auth)
//! ```

pub mod auth;
pub mod catalog;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(catalog::index))
        .route("/product/{id}", get(products::show))
        .route("/search", get(catalog::search))
        .route("/category/{name}", get(catalog::category))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/profile", get(catalog::profile))
}
