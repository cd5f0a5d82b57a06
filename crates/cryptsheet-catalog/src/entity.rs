//! Entity descriptors and the capability trait the frame pipeline consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::paths::DataRoot;

/// Top-level namespace an entity's variants are published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Items,
    Enemies,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Items => "items",
            Category::Enemies => "enemies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can supply a sprite sheet to the frame pipeline.
///
/// The pipeline only needs these accessors, so it stays agnostic of the
/// concrete entity kind.
pub trait SpriteSource {
    /// Entity name as it appears in the catalog.
    fn name(&self) -> &str;

    fn category(&self) -> Category;

    /// Frame count as declared by the catalog. Not validated here.
    fn frame_count(&self) -> i32;

    /// Resolved sheet location, or `None` when the catalog omits it.
    fn sheet_path(&self, root: &DataRoot) -> Option<PathBuf>;

    /// Suffix appended to the name (enemy sub-types). Empty by default.
    fn qualifier(&self) -> &str {
        ""
    }

    /// `<category>/<name><qualifier>`, the prefix of every published name.
    fn base_name(&self) -> String {
        format!("{}/{}{}", self.category(), self.name(), self.qualifier())
    }
}

/// An item entry. Item sheets live in the data root's `items` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub frame_count: i32,
}

impl SpriteSource for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Category {
        Category::Items
    }

    fn frame_count(&self) -> i32 {
        self.frame_count
    }

    fn sheet_path(&self, root: &DataRoot) -> Option<PathBuf> {
        self.image_path
            .as_deref()
            .map(|path| root.resolve_item_sheet(path))
    }
}

/// Sheet reference nested inside an enemy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheetRef {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub frame_count: i32,
}

/// An enemy entry. Several enemies share a name and differ by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub sprite_sheet: SpriteSheetRef,
}

impl SpriteSource for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Category {
        Category::Enemies
    }

    fn frame_count(&self) -> i32 {
        self.sprite_sheet.frame_count
    }

    fn sheet_path(&self, root: &DataRoot) -> Option<PathBuf> {
        self.sprite_sheet
            .path
            .as_deref()
            .map(|path| root.resolve_enemy_sheet(path))
    }

    fn qualifier(&self) -> &str {
        &self.kind
    }
}

/// Either kind of catalog entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityDescriptor {
    Item(Item),
    Enemy(Enemy),
}

impl EntityDescriptor {
    fn source(&self) -> &dyn SpriteSource {
        match self {
            EntityDescriptor::Item(item) => item,
            EntityDescriptor::Enemy(enemy) => enemy,
        }
    }
}

impl SpriteSource for EntityDescriptor {
    fn name(&self) -> &str {
        self.source().name()
    }

    fn category(&self) -> Category {
        self.source().category()
    }

    fn frame_count(&self) -> i32 {
        self.source().frame_count()
    }

    fn sheet_path(&self, root: &DataRoot) -> Option<PathBuf> {
        self.source().sheet_path(root)
    }

    fn qualifier(&self) -> &str {
        self.source().qualifier()
    }
}

impl From<Item> for EntityDescriptor {
    fn from(item: Item) -> Self {
        EntityDescriptor::Item(item)
    }
}

impl From<Enemy> for EntityDescriptor {
    fn from(enemy: Enemy) -> Self {
        EntityDescriptor::Enemy(enemy)
    }
}
