use crate::core::cache::KeyValueCollection;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionHandle, PersistMode};
use std::sync::Arc;
use tracing::debug;

/// A collection backed by one fjall partition. Writes are synced to disk
/// before returning.
pub struct DiskCollection {
    keyspace: Arc<Keyspace>,
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn new(keyspace: Arc<Keyspace>, partition: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
        }
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.partition.get(key) {
            Ok(Some(value)) => Some(value.to_vec()),
            Ok(None) => {
                debug!("Disk cache MISS");
                None
            }
            Err(e) => {
                debug!("DiskCollection get error: {}", e);
                None
            }
        }
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Disk cache PUT");
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use fjall::PartitionCreateOptions;
    use tempfile::tempdir;

    fn open_collection(path: &std::path::Path) -> DiskCollection {
        let keyspace = Arc::new(fjall::Config::new(path).open().unwrap());
        let partition = keyspace
            .open_partition("test", PartitionCreateOptions::default())
            .unwrap();
        DiskCollection::new(keyspace, partition)
    }

    #[tokio::test]
    async fn test_disk_collection_get_put() {
        let dir = tempdir().unwrap();
        let collection = open_collection(dir.path());

        assert!(collection.get(b"key1").await.is_none());

        collection.put(b"key1", b"123").await.unwrap();
        assert_eq!(collection.get(b"key1").await, Some(b"123".to_vec()));

        assert!(collection.get(b"key2").await.is_none());
    }

    #[tokio::test]
    async fn test_disk_collection_overwrite() {
        let dir = tempdir().unwrap();
        let collection = open_collection(dir.path());

        collection.put(b"key1", b"first").await.unwrap();
        collection.put(b"key1", b"second").await.unwrap();
        assert_eq!(collection.get(b"key1").await, Some(b"second".to_vec()));
    }
}
