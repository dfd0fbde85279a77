//! Account records keyed by email.

use std::sync::Arc;

use recall_core::{normalize_email, User};

use crate::error::Result;
use crate::keys;
use crate::records::{get_json, set_json};
use crate::KvStore;

/// Reads and writes `User` records.
#[derive(Clone)]
pub struct UserStore {
    kv: Arc<dyn KvStore>,
}

impl UserStore {
    /// Wrap a key-value backend.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Look up an account. The email is normalized before lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the record is malformed.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        get_json(self.kv.as_ref(), &keys::user_key(&normalize_email(email))).await
    }

    /// Insert or replace an account under its email.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub async fn put(&self, user: &User) -> Result<()> {
        set_json(self.kv.as_ref(), &keys::user_key(&user.email), user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryKv;

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let kv = Arc::new(MemoryKv::new());
        let users = UserStore::new(kv.clone());
        let user = User::new("Ada@Example.com", "phc-hash".into());
        users.put(&user).await.unwrap();

        let loaded = users.get_by_email("ADA@example.com").await.unwrap();
        assert_eq!(loaded, Some(user));
        assert_eq!(kv.keys().await, vec!["memory:user:ada@example.com".to_string()]);
    }

    #[tokio::test]
    async fn unknown_email_is_none() {
        let users = UserStore::new(Arc::new(MemoryKv::new()));
        assert!(users.get_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
