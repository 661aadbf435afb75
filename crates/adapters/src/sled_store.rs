//! `sled`-backed `KeyedStore`. Chosen over a hosted wide-column
//! service (see the policy resolution in DESIGN.md) because the core
//! only ever needs simple partition/sort-key get/put/delete/scan
//! operations — `sled` gives that with zero network dependency and a
//! file on disk the integration tests can point at a tempdir.

use crate::error::{AdapterError, Result};
use crate::traits::KeyedStore;
use async_trait::async_trait;

pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let db = sled::open(path).map_err(|e| AdapterError::Store(e.to_string()))?;
        Ok(Self { db })
    }

    fn tree(&self, partition: &str) -> Result<sled::Tree> {
        self.db
            .open_tree(partition)
            .map_err(|e| AdapterError::Store(e.to_string()))
    }
}

#[async_trait]
impl KeyedStore for SledStore {
    async fn get(&self, partition: &str, sort: &str) -> Result<Option<Vec<u8>>> {
        let tree = self.tree(partition)?;
        tree.get(sort)
            .map(|opt| opt.map(|v| v.to_vec()))
            .map_err(|e| AdapterError::Store(e.to_string()))
    }

    async fn put(&self, partition: &str, sort: &str, value: Vec<u8>) -> Result<()> {
        let tree = self.tree(partition)?;
        tree.insert(sort, value)
            .map_err(|e| AdapterError::Store(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, partition: &str, sort: &str) -> Result<()> {
        let tree = self.tree(partition)?;
        tree.remove(sort)
            .map_err(|e| AdapterError::Store(e.to_string()))?;
        Ok(())
    }

    async fn scan_partition(&self, partition: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let tree = self.tree(partition)?;
        tree.iter()
            .map(|entry| {
                let (k, v) = entry.map_err(|e| AdapterError::Store(e.to_string()))?;
                let key = String::from_utf8_lossy(&k).to_string();
                Ok((key, v.to_vec()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_a_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path()).unwrap();
        store.put("sg-123", "default#Create#Tag.Owner", b"hello".to_vec()).await.unwrap();
        let got = store.get("sg-123", "default#Create#Tag.Owner").await.unwrap();
        assert_eq!(got, Some(b"hello".to_vec()));
    }
}
