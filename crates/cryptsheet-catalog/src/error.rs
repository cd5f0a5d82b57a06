//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while reading an entity catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[source] serde_json::Error),
}
