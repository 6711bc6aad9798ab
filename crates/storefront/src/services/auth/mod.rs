//! Authentication service.
//!
//! Verifies username/password pairs against the credential store.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::models::Principal;
use crate::store::UserStore;

/// Authentication service.
///
/// Borrowed per request from the application state.
pub struct AuthService<'a> {
    users: &'a UserStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserStore) -> Self {
        Self { users }
    }

    /// Login with username and password.
    ///
    /// An unknown username and a wrong password fail identically so callers
    /// cannot tell which one happened.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        let user = self
            .users
            .find(username)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(Principal::new(user.username.clone()))
    }
}

/// Hash a password using Argon2id with a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match or
/// the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_shop_core::Email;

    use super::*;
    use crate::models::UserRecord;

    fn store() -> UserStore {
        UserStore::new(vec![UserRecord {
            username: "admin".to_string(),
            password_hash: hash_password("admin123").unwrap(),
            email: Email::parse("admin@example.com").unwrap(),
        }])
    }

    #[test]
    fn test_hash_is_salted_and_not_plaintext() {
        let first = hash_password("admin123").unwrap();
        let second = hash_password("admin123").unwrap();
        assert_ne!(first, second);
        assert!(!first.contains("admin123"));
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("customer123").unwrap();
        assert!(verify_password("customer123", &hash).is_ok());
        assert_eq!(
            verify_password("Customer123", &hash),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert_eq!(
            verify_password("admin123", "admin123"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_login_success() {
        let users = store();
        let principal = AuthService::new(&users).login("admin", "admin123").unwrap();
        assert_eq!(principal, Principal::new("admin"));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let users = store();
        let service = AuthService::new(&users);

        let wrong_password = service.login("admin", "wrong").unwrap_err();
        let unknown_user = service.login("ghost", "admin123").unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[test]
    fn test_login_empty_credentials() {
        let users = store();
        assert_eq!(
            AuthService::new(&users).login("", ""),
            Err(AuthError::InvalidCredentials)
        );
    }
}
