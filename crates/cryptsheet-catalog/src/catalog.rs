//! JSON catalog loading.
//!
//! The catalog lists items and enemies in the order they are processed.
//! Unknown fields are ignored; nothing beyond the JSON shape is validated.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::entity::{Enemy, EntityDescriptor, Item};
use crate::error::{CatalogError, CatalogResult};

/// Both entity collections of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
}

impl Catalog {
    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse catalog JSON from memory.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(CatalogError::Json)
    }

    /// All entities, items first, each collection in file order.
    pub fn entities(&self) -> Vec<EntityDescriptor> {
        self.items
            .iter()
            .cloned()
            .map(EntityDescriptor::from)
            .chain(self.enemies.iter().cloned().map(EntityDescriptor::from))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.enemies.is_empty()
    }
}
