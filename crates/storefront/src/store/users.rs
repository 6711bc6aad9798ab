//! Credential store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::UserRecord;

/// Read-only lookup of users by username.
///
/// Cloning is cheap; all clones share one table.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<HashMap<String, UserRecord>>,
}

impl UserStore {
    /// Build a store from records. A later record replaces an earlier one
    /// with the same username.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        Self {
            users: Arc::new(users),
        }
    }

    /// Find a user by exact username.
    #[must_use]
    pub fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_shop_core::Email;

    use super::*;

    fn record(username: &str, email: &str) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email: Email::parse(email).unwrap(),
        }
    }

    #[test]
    fn test_find_is_exact() {
        let store = UserStore::new([record("admin", "admin@example.com")]);
        assert!(store.find("admin").is_some());
        assert!(store.find("Admin").is_none());
        assert!(store.find("adm").is_none());
    }

    #[test]
    fn test_clones_share_table() {
        let store = UserStore::new([
            record("admin", "admin@example.com"),
            record("customer", "customer@example.com"),
        ]);
        let clone = store.clone();
        assert_eq!(clone.len(), 2);
        assert_eq!(
            clone.find("customer").unwrap().email.as_str(),
            "customer@example.com"
        );
    }

    #[test]
    fn test_debug_hides_hash() {
        let store = UserStore::new([record("admin", "admin@example.com")]);
        let output = format!("{store:?}");
        assert!(output.contains("admin@example.com"));
        assert!(!output.contains("$argon2id$stub"));
    }
}
