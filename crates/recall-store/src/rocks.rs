//! `RocksDB` key-value backend.
//!
//! Values are stored as JSON bytes in the default column family, keyed by the
//! UTF-8 bytes of the string key.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::KvStore;

/// RocksDB-backed key-value store.
pub struct RocksKv {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksKv {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::open(&opts, path)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl KvStore for RocksKv {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.db
            .get(key.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(|data| serde_json::from_slice(&data).map_err(StoreError::from))
            .transpose()
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let data = serde_json::to_vec(&value)?;
        self.db
            .put(key.as_bytes(), data)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksKv, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksKv::open(dir.path()).unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn values_round_trip() {
        let (store, _dir) = create_test_store();

        assert!(store.get("memory:score-index:u:2024-03").await.unwrap().is_none());

        store
            .set("memory:score-index:u:2024-03", json!(["2024-03-01"]))
            .await
            .unwrap();
        let value = store.get("memory:score-index:u:2024-03").await.unwrap();
        assert_eq!(value, Some(json!(["2024-03-01"])));
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = RocksKv::open(dir.path()).unwrap();
            store.set("k", json!({ "a": 1 })).await.unwrap();
        }
        let store = RocksKv::open(dir.path()).unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!({ "a": 1 })));
    }
}
