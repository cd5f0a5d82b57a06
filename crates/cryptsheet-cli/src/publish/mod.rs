//! Content store abstraction.
//!
//! A [`Publisher`] accepts named byte buffers with blob properties. Writes
//! overwrite whatever is stored under the same name, so re-running the tool
//! republishes identical content in place.

mod directory;
mod memory;

pub use directory::{BlobMeta, DirectoryStore};
pub use memory::{MemoryStore, StoredBlob};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content type used when none is derived from the variant.
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Cache policy applied to every published blob (one week).
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=604800";

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur while publishing a blob.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize blob metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid blob name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("store rejected '{0}'")]
    Rejected(String),

    #[error("invalid store location: {0}")]
    Config(String),
}

/// Properties stored with each blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobProperties {
    pub content_type: String,
    pub cache_control: String,
}

impl Default for BlobProperties {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}

/// A named-blob content store.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Short store identifier for logs.
    fn store_name(&self) -> &'static str;

    /// Make the store ready to accept blobs. Idempotent.
    async fn prepare(&self) -> PublishResult<()> {
        Ok(())
    }

    /// Store `data` under `name`, replacing any existing blob.
    async fn put(&self, name: &str, data: &[u8], properties: &BlobProperties) -> PublishResult<()>;
}

/// Checks that a blob name is a relative, forward-slash path without `..`.
pub fn validate_blob_name(name: &str) -> PublishResult<()> {
    let invalid = |reason: &str| {
        Err(PublishError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.starts_with('/') {
        return invalid("name must be relative");
    }
    if name.contains('\\') {
        return invalid("name must use forward slashes only");
    }
    if name.len() >= 2 && name.chars().nth(1) == Some(':') {
        return invalid("name must not contain a drive letter");
    }
    if name.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return invalid("name must not contain '..' or empty segments");
    }
    Ok(())
}
