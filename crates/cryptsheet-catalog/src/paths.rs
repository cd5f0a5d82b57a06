//! Data-root path resolution.

use std::path::{Path, PathBuf};

/// Directory under the data root holding item sheets.
pub const ITEMS_DIR: &str = "items";

/// The directory all catalog-relative paths are resolved against.
///
/// Built once at startup and passed to whatever needs to locate a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Location of the catalog file with the given name.
    pub fn catalog_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Item image paths are relative to `<root>/items`.
    pub fn resolve_item_sheet(&self, image_path: &str) -> PathBuf {
        self.root.join(ITEMS_DIR).join(image_path)
    }

    /// Enemy sheet paths are relative to the root itself.
    pub fn resolve_enemy_sheet(&self, sheet_path: &str) -> PathBuf {
        self.root.join(sheet_path)
    }
}
