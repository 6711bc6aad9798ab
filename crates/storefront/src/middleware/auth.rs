//! Authentication middleware and extractors.
//!
//! The logged-in principal lives in the session. Handlers read it through
//! these extractors instead of any ambient "current user" accessor.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::flash::push_flash;
use crate::models::{Flash, Principal, session_keys};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Notice shown when a protected page bounces an anonymous visitor.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

/// Extractor that requires an authenticated principal.
///
/// If nobody is logged in, redirects to the login page with the original path
/// in `next` and a flash notice. The session's principal is left untouched.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(principal): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", principal.id)
/// }
/// ```
pub struct RequireAuth(pub Principal);

/// Error returned when authentication is required but nobody is logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page, remembering where the visitor was headed.
    RedirectToLogin { next: String },
    /// The session layer is missing.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { next } => {
                Redirect::to(&login_redirect_target(&next)).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Build `/login?next=...` for a path the visitor tried to reach.
#[must_use]
pub fn login_redirect_target(next: &str) -> String {
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(next))
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        if let Some(principal) = current_principal(session).await {
            return Ok(Self(principal));
        }

        let next = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);

        tracing::debug!(path = %next, "anonymous request to protected route");

        if let Err(e) = push_flash(session, Flash::info(LOGIN_REQUIRED_MESSAGE)).await {
            tracing::warn!("Failed to queue login notice: {}", e);
        }

        Err(AuthRejection::RedirectToLogin { next })
    }
}

/// Extractor that optionally gets the current principal.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged in.
pub struct OptionalAuth(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = match parts.extensions.get::<Session>() {
            Some(session) => current_principal(session).await,
            None => None,
        };

        Ok(Self(principal))
    }
}

/// Read the principal from the session, treating read errors as anonymous.
pub async fn current_principal(session: &Session) -> Option<Principal> {
    session
        .get::<Principal>(session_keys::PRINCIPAL)
        .await
        .ok()
        .flatten()
}

/// Store the principal in the session (login).
///
/// The session ID is rotated first so a pre-login session cookie cannot be
/// reused after authentication.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_principal(
    session: &Session,
    principal: &Principal,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::PRINCIPAL, principal).await
}

/// Remove the principal from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_principal(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<Principal>(session_keys::PRINCIPAL)
        .await?;
    session.cycle_id().await
}
