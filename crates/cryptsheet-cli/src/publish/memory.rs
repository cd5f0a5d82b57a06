//! In-memory content store, used by tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;

use super::{validate_blob_name, BlobProperties, PublishError, PublishResult, Publisher};

/// A blob as held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub data: Vec<u8>,
    pub properties: BlobProperties,
    /// How many times this name has been written.
    pub writes: u32,
}

/// Blob store backed by a sorted map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<BTreeMap<String, StoredBlob>>,
    rejected: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `put` for `name` with [`PublishError::Rejected`].
    pub fn with_rejected(mut self, name: impl Into<String>) -> Self {
        self.rejected.insert(name.into());
        self
    }

    pub async fn get(&self, name: &str) -> Option<StoredBlob> {
        self.blobs.lock().await.get(name).cloned()
    }

    pub async fn names(&self) -> Vec<String> {
        self.blobs.lock().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.lock().await.is_empty()
    }

    /// Copy of the whole store.
    pub async fn snapshot(&self) -> BTreeMap<String, StoredBlob> {
        self.blobs.lock().await.clone()
    }
}

#[async_trait]
impl Publisher for MemoryStore {
    fn store_name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, name: &str, data: &[u8], properties: &BlobProperties) -> PublishResult<()> {
        validate_blob_name(name)?;
        if self.rejected.contains(name) {
            return Err(PublishError::Rejected(name.to_string()));
        }

        let mut blobs = self.blobs.lock().await;
        let writes = blobs.get(name).map_or(0, |blob| blob.writes) + 1;
        blobs.insert(
            name.to_string(),
            StoredBlob {
                data: data.to_vec(),
                properties: properties.clone(),
                writes,
            },
        );
        Ok(())
    }
}
