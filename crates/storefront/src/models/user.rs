//! User domain types.

use corner_shop_core::Email;

/// A storefront user as held by the credential store.
///
/// Records are created once at startup and never change.
#[derive(Clone)]
pub struct UserRecord {
    /// Unique username; the identity key.
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub email: Email,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}
