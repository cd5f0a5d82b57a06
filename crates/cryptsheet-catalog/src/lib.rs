//! cryptsheet Catalog Library
//!
//! This crate describes the game entities whose sprite sheets are turned into
//! published frame variants, and resolves their sheet files against a data root.
//!
//! # Overview
//!
//! - **Entities**: [`Item`] and [`Enemy`] descriptors, unified behind the
//!   [`SpriteSource`] capability trait and the [`EntityDescriptor`] tagged enum
//! - **Catalog**: JSON catalog loading ([`Catalog::load`])
//! - **Paths**: [`DataRoot`], the explicit path-resolution context
//!
//! # Example
//!
//! ```
//! use cryptsheet_catalog::{Catalog, DataRoot, SpriteSource};
//!
//! let catalog = Catalog::from_json_str(
//!     r#"{"enemies": [{"name": "Bat", "type": "A",
//!         "sprite_sheet": {"path": "entities/bat.png", "frame_count": 4}}]}"#,
//! )
//! .unwrap();
//!
//! let root = DataRoot::new("/data");
//! let entities = catalog.entities();
//! let bat = &entities[0];
//! assert_eq!(bat.base_name(), "enemies/BatA");
//! assert_eq!(bat.frame_count(), 4);
//! assert!(bat.sheet_path(&root).unwrap().ends_with("entities/bat.png"));
//! ```

pub mod catalog;
pub mod entity;
pub mod error;
pub mod paths;

pub use catalog::Catalog;
pub use entity::{Category, Enemy, EntityDescriptor, Item, SpriteSheetRef, SpriteSource};
pub use error::{CatalogError, CatalogResult};
pub use paths::DataRoot;
