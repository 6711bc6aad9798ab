//! Authentication route handlers.
//!
//! Login checks the form against the in-memory credential store and keeps the
//! principal in the session. Logout removes it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use url::Url;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    OptionalAuth, PageContext, RequireAuth, clear_principal, push_flash, set_principal,
};
use crate::models::Flash;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Notice shown after a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";

/// Notice shown when the credentials do not match.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Notice shown after logout.
pub const LOGOUT_MESSAGE: &str = "You have been logged out.";

// =============================================================================
// Form Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Login form data.
///
/// Every field is optional so a partial submission reaches the handler and is
/// rejected like bad credentials instead of failing extraction.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    /// Local path to continue to after login.
    pub next: Option<String>,
    /// Username to prefill after a failed attempt.
    pub username: String,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Response {
    if principal.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        page: PageContext::load(&session).await,
        next: query
            .next
            .filter(|next| is_safe_next(&state.config().base_url, next)),
        username: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if principal.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();
    let next = form
        .next
        .filter(|next| is_safe_next(&state.config().base_url, next));

    let outcome = if username.is_empty() || password.is_empty() {
        Err(AuthError::InvalidCredentials)
    } else {
        state.auth().login(&username, &password)
    };

    match outcome {
        Ok(principal) => {
            set_principal(&session, &principal).await?;
            set_sentry_user(&principal.id);
            add_breadcrumb("auth", "User logged in", None);
            tracing::info!(user = %principal.id, "login succeeded");

            push_flash(&session, Flash::success(LOGIN_SUCCESS_MESSAGE)).await?;
            Ok(Redirect::to(next.as_deref().unwrap_or("/")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(user = %username, "login rejected");

            let mut page = PageContext::load(&session).await;
            page.flash(Flash::error(INVALID_CREDENTIALS_MESSAGE));
            Ok(LoginTemplate {
                page,
                next,
                username,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle logout.
#[instrument(skip_all)]
pub async fn logout(RequireAuth(principal): RequireAuth, session: Session) -> Result<Response> {
    clear_principal(&session).await?;
    clear_sentry_user();
    add_breadcrumb("auth", "User logged out", None);
    tracing::info!(user = %principal.id, "logout");

    push_flash(&session, Flash::info(LOGOUT_MESSAGE)).await?;
    Ok(Redirect::to("/").into_response())
}

/// Whether `next` is a path on this site rather than another origin.
///
/// Browsers drop tabs and newlines and treat `\` as `/` when resolving a
/// `Location`, so any of those makes the value unsafe. What remains must
/// resolve against `base` to the same origin.
fn is_safe_next(base: &Url, next: &str) -> bool {
    if !next.starts_with('/')
        || next.starts_with("//")
        || next
            .chars()
            .any(|c| c == '\\' || c.is_control() || c.is_whitespace())
    {
        return false;
    }

    base.join(next)
        .is_ok_and(|resolved| resolved.origin() == base.origin())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:3000").unwrap()
    }

    #[test]
    fn test_is_safe_next() {
        let base = base();
        assert!(is_safe_next(&base, "/profile"));
        assert!(is_safe_next(&base, "/search?q=shoes"));
        assert!(!is_safe_next(&base, "https://evil.example"));
        assert!(!is_safe_next(&base, "//evil.example"));
        assert!(!is_safe_next(&base, "/\\evil.example"));
        assert!(!is_safe_next(&base, "profile"));
        assert!(!is_safe_next(&base, ""));
    }

    #[test]
    fn test_is_safe_next_rejects_stripped_characters() {
        let base = base();
        assert!(!is_safe_next(&base, "/\t/evil.example"));
        assert!(!is_safe_next(&base, "/\n/evil.example"));
        assert!(!is_safe_next(&base, "/\r/evil.example"));
        assert!(!is_safe_next(&base, "/ /evil.example"));
        assert!(!is_safe_next(&base, "/\u{0}/evil.example"));
        assert!(!is_safe_next(&base, "/search?q=a b"));
    }
}
