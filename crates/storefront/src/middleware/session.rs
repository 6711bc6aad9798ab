//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions, with the cookie signed by
//! the configured session secret.

use tower_sessions::cookie::SameSite;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "corner_shop_session";

/// Create the session layer with an in-memory store.
///
/// Sessions end when the browser closes; there is no server-side expiry.
#[must_use]
pub fn create_session_layer(state: &AppState) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(state.config().is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(state.session_key().clone())
}
