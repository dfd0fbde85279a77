//! In-process key-value backend.
//!
//! Used for tests and for running the service without external storage.
//! Contents are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::KvStore;

/// A `HashMap` behind an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryKv {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All keys currently stored, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_missing_is_none() {
        let kv = MemoryKv::new();
        assert!(kv.get("nope").await.unwrap().is_none());
        assert!(kv.is_empty().await);
    }

    #[tokio::test]
    async fn set_then_get_overwrites() {
        let kv = MemoryKv::new();
        kv.set("k", json!([1])).await.unwrap();
        kv.set("k", json!([1, 2])).await.unwrap();

        assert_eq!(kv.get("k").await.unwrap(), Some(json!([1, 2])));
        assert_eq!(kv.len().await, 1);
        assert_eq!(kv.keys().await, vec!["k".to_string()]);
    }
}
