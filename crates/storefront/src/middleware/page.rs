//! Per-request data every rendered page needs.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::auth::current_principal;
use super::flash::take_flashes;
use crate::models::{Flash, Principal};

/// Layout context shared by every full-page template.
///
/// Loading it drains the flash queue, so handlers that may redirect instead of
/// rendering should take the `Session` and call [`PageContext::load`] only on
/// the rendering path.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The logged-in principal, if any.
    pub principal: Option<Principal>,
    /// Notices to show at the top of the page.
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Read the principal and drain pending flashes from the session.
    pub async fn load(session: &Session) -> Self {
        let principal = current_principal(session).await;
        let flashes = take_flashes(session).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to read flash notices: {}", e);
            Vec::new()
        });

        Self { principal, flashes }
    }

    /// Add a notice for the page being rendered right now.
    pub fn flash(&mut self, flash: Flash) {
        self.flashes.push(flash);
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            tracing::warn!(
                "Session not found in request extensions - middleware may be misconfigured"
            );
            return Ok(Self::default());
        };

        Ok(Self::load(session).await)
    }
}
