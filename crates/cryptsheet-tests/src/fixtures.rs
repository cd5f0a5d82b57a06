//! Test fixture utilities for creating synthetic data directories.

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cryptsheet_catalog::DataRoot;
use cryptsheet_cli::config::DEFAULT_CATALOG_FILE;
use cryptsheet_cli::RunConfig;

/// Deterministic sheet contents: every frame cell gets its own color and a
/// transparent one-pixel border so scaling has alpha edges to blend.
pub fn sheet_pixels(width: u32, height: u32, frame_count: u32) -> RgbaImage {
    let frame_width = (width / frame_count.max(1)).max(1);
    let frame_height = (height / 2).max(1);
    RgbaImage::from_fn(width, height, |x, y| {
        let (fx, fy) = (x % frame_width, y % frame_height);
        if fx == 0 || fy == 0 || fx + 1 == frame_width || fy + 1 == frame_height {
            return Rgba([0, 0, 0, 0]);
        }
        let column = (x / frame_width) as u8;
        let row = (y / frame_height) as u8;
        Rgba([
            column.wrapping_mul(53).wrapping_add(fx as u8),
            row.wrapping_mul(97).wrapping_add(fy as u8),
            200,
            if row == 0 { 255 } else { 128 },
        ])
    })
}

/// A data directory with sprite sheets and a catalog, deleted on drop.
pub struct DataDirFixture {
    pub root: TempDir,
    items: Vec<Value>,
    enemies: Vec<Value>,
}

impl Default for DataDirFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DataDirFixture {
    /// Create a new empty data directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self {
            root,
            items: Vec::new(),
            enemies: Vec::new(),
        }
    }

    /// Get the data directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path-resolution context for this directory.
    pub fn data_root(&self) -> DataRoot {
        DataRoot::new(self.path())
    }

    /// Run configuration pointing at this directory with default settings.
    pub fn config(&self) -> RunConfig {
        RunConfig::new(self.path())
    }

    /// Write a PNG sheet at `relative` and return its absolute path.
    pub fn write_sheet(&self, relative: &str, width: u32, height: u32, frames: u32) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create sheet dir");
        }
        sheet_pixels(width, height, frames)
            .save_with_format(&path, ImageFormat::Png)
            .expect("Failed to write sheet");
        path
    }

    /// Add an enemy whose sheet lives at `entities/<name>.png`.
    ///
    /// The sheet is sized `width` x `height` and painted for `frame_count`
    /// columns; a non-positive count still registers the entity.
    pub fn add_enemy(
        &mut self,
        name: &str,
        kind: &str,
        frame_count: i32,
        width: u32,
        height: u32,
    ) -> &mut Self {
        let relative = format!("entities/{}.png", name.to_lowercase());
        self.write_sheet(&relative, width, height, frame_count.max(1) as u32);
        self.enemies.push(json!({
            "name": name,
            "type": kind,
            "sprite_sheet": { "path": relative, "frame_count": frame_count }
        }));
        self
    }

    /// Add an enemy entry without writing its sheet.
    pub fn add_enemy_without_sheet(&mut self, name: &str, frame_count: i32) -> &mut Self {
        self.enemies.push(json!({
            "name": name,
            "sprite_sheet": {
                "path": format!("entities/{}.png", name.to_lowercase()),
                "frame_count": frame_count
            }
        }));
        self
    }

    /// Add an item whose sheet lives at `items/<name>.png`.
    pub fn add_item(&mut self, name: &str, frame_count: i32, width: u32, height: u32) -> &mut Self {
        let file = format!("{}.png", name.to_lowercase());
        self.write_sheet(
            &format!("items/{}", file),
            width,
            height,
            frame_count.max(1) as u32,
        );
        self.items.push(json!({
            "name": name,
            "image_path": file,
            "frame_count": frame_count
        }));
        self
    }

    /// Write `catalog.json` with every entity added so far.
    pub fn write_catalog(&self) -> PathBuf {
        let path = self.path().join(DEFAULT_CATALOG_FILE);
        let catalog = json!({ "items": self.items, "enemies": self.enemies });
        let text = serde_json::to_string_pretty(&catalog).expect("Failed to serialize catalog");
        fs::write(&path, text).expect("Failed to write catalog");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_catalog_and_sheets() {
        let mut data = DataDirFixture::new();
        data.add_enemy("Bat", "A", 4, 128, 64).add_item("Potion", 1, 16, 32);
        let catalog_path = data.write_catalog();

        assert!(catalog_path.exists());
        assert!(data.path().join("entities/bat.png").exists());
        assert!(data.path().join("items/potion.png").exists());

        let catalog = data.config().load_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_sheet_pixels_borders_are_transparent() {
        let pixels = sheet_pixels(128, 64, 4);
        assert_eq!(pixels.get_pixel(0, 0)[3], 0);
        assert_eq!(pixels.get_pixel(31, 5)[3], 0);
        assert_eq!(pixels.get_pixel(5, 5)[3], 255);
        assert_eq!(pixels.get_pixel(5, 40)[3], 128);
    }
}
