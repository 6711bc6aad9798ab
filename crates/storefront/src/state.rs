//! Application state shared across handlers.

use std::sync::Arc;

use corner_shop_core::Catalog;
use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;

use crate::config::StorefrontConfig;
use crate::services::auth::AuthService;
use crate::store::UserStore;

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid session secret: {0}")]
    SessionKey(String),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The stores are injected by the
/// caller so tests can supply their own data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    users: UserStore,
    catalog: Catalog,
    session_key: Key,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `users` - Credential store
    /// * `catalog` - Product catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the session secret cannot be used as a signing key.
    pub fn new(
        config: StorefrontConfig,
        users: UserStore,
        catalog: Catalog,
    ) -> Result<Self, StateError> {
        let session_key = Key::try_from(config.session_secret.expose_secret().as_bytes())
            .map_err(|e| StateError::SessionKey(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                catalog,
                session_key,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the key used to sign session cookies.
    #[must_use]
    pub fn session_key(&self) -> &Key {
        &self.inner.session_key
    }

    /// Borrow an authentication service over the credential store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.users())
    }
}
