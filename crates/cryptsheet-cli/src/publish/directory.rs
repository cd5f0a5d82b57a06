//! Filesystem-backed content store.
//!
//! Blobs are written to `<root>/<container>/<name>` with a
//! `<name>.meta.json` sidecar carrying the blob properties and digest.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{validate_blob_name, BlobProperties, PublishError, PublishResult, Publisher};

const FILE_SCHEME: &str = "file://";
const META_SUFFIX: &str = ".meta.json";

/// Sidecar written next to every blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMeta {
    pub content_type: String,
    pub cache_control: String,
    pub size: u64,
    pub blake3: String,
}

/// A container directory acting as a blob store.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    container_dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl AsRef<Path>, container: &str) -> Self {
        Self {
            container_dir: root.as_ref().join(container),
        }
    }

    /// Parse a store location: a directory path, optionally `file://`-prefixed.
    pub fn from_location(location: &str, container: &str) -> PublishResult<Self> {
        let path = location.strip_prefix(FILE_SCHEME).unwrap_or(location);
        if path.is_empty() {
            return Err(PublishError::Config(format!(
                "store location '{}' has no path",
                location
            )));
        }
        if container.is_empty() || container.contains(['/', '\\']) || container == ".." {
            return Err(PublishError::Config(format!(
                "container name '{}' must be a single path segment",
                container
            )));
        }
        Ok(Self::new(path, container))
    }

    pub fn container_dir(&self) -> &Path {
        &self.container_dir
    }

    /// Where the blob named `name` is written.
    pub fn blob_path(&self, name: &str) -> PathBuf {
        self.container_dir.join(name)
    }

    /// Where the sidecar for `name` is written.
    pub fn meta_path(&self, name: &str) -> PathBuf {
        let mut path = self.blob_path(name).into_os_string();
        path.push(META_SUFFIX);
        PathBuf::from(path)
    }
}

#[async_trait]
impl Publisher for DirectoryStore {
    fn store_name(&self) -> &'static str {
        "directory"
    }

    async fn prepare(&self) -> PublishResult<()> {
        fs::create_dir_all(&self.container_dir).await?;
        Ok(())
    }

    async fn put(&self, name: &str, data: &[u8], properties: &BlobProperties) -> PublishResult<()> {
        validate_blob_name(name)?;

        let blob_path = self.blob_path(name);
        if let Some(parent) = blob_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&blob_path, data).await?;

        let meta = BlobMeta {
            content_type: properties.content_type.clone(),
            cache_control: properties.cache_control.clone(),
            size: data.len() as u64,
            blake3: blake3::hash(data).to_hex().to_string(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)?;
        fs::write(self.meta_path(name), meta_json).await?;

        Ok(())
    }
}
