//! Run configuration shared by the commands.

use cryptsheet_catalog::{Catalog, CatalogResult, DataRoot};
use cryptsheet_frames::{FrameSetBuilder, PngConfig};
use std::path::{Path, PathBuf};

use crate::publish::{BlobProperties, DEFAULT_CACHE_CONTROL, DEFAULT_CONTENT_TYPE};

/// Store container all blobs are written into.
pub const DEFAULT_CONTAINER: &str = "crypt";

/// Catalog file name inside the data directory.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Upper bound on in-flight publish operations. `0` means unbounded.
pub const DEFAULT_PUBLISH_CONCURRENCY: usize = 32;

/// Everything a pipeline run needs besides the store itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub catalog_file: String,
    pub publish_concurrency: usize,
    pub cache_control: String,
    /// Content type stored with every blob, whatever the sheet format.
    pub content_type: String,
    pub png: PngConfig,
}

impl RunConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            publish_concurrency: DEFAULT_PUBLISH_CONCURRENCY,
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            png: PngConfig::default(),
        }
    }

    pub fn with_catalog_file(mut self, file_name: impl Into<String>) -> Self {
        self.catalog_file = file_name.into();
        self
    }

    pub fn with_publish_concurrency(mut self, limit: usize) -> Self {
        self.publish_concurrency = limit;
        self
    }

    pub fn with_cache_control(mut self, cache_control: impl Into<String>) -> Self {
        self.cache_control = cache_control.into();
        self
    }

    /// Properties every published blob carries.
    pub fn blob_properties(&self) -> BlobProperties {
        BlobProperties {
            content_type: self.content_type.clone(),
            cache_control: self.cache_control.clone(),
        }
    }

    pub fn data_root(&self) -> DataRoot {
        DataRoot::new(&self.data_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_root().catalog_path(&self.catalog_file)
    }

    pub fn load_catalog(&self) -> CatalogResult<Catalog> {
        Catalog::load(&self.catalog_path())
    }

    pub fn frame_set_builder(&self) -> FrameSetBuilder {
        FrameSetBuilder::with_png_config(self.png.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
