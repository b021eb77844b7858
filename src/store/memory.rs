use crate::core::cache::KeyValueCollection;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory collection, used when the on-disk cache is unavailable and in tests.
#[derive(Default)]
pub struct MemoryCollection {
    inner: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCollection for MemoryCollection {
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let value = self.inner.lock().await.get(key).cloned();
        if value.is_some() {
            debug!("Memory cache HIT");
        } else {
            debug!("Memory cache MISS");
        }
        value
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.inner.lock().await.insert(key.to_vec(), value.to_vec());
        debug!("Memory cache PUT");
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_collection_get_put() {
        let collection = MemoryCollection::new();

        assert!(collection.get(b"key1").await.is_none());

        collection.put(b"key1", b"123").await.unwrap();
        assert_eq!(collection.get(b"key1").await, Some(b"123".to_vec()));

        assert!(collection.get(b"key2").await.is_none());
    }
}
