//! Data directories for command tests.

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

use crate::config::RunConfig;

/// Enemies as `(name, frame_count)`; each gets a 64x32 sheet.
pub(crate) fn data_dir(enemies: &[(&str, i32)]) -> (TempDir, RunConfig) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("entities")).unwrap();

    let mut entries = Vec::new();
    for (name, frame_count) in enemies {
        let path = format!("entities/{}.png", name.to_lowercase());
        RgbaImage::from_fn(64, 32, |x, y| Rgba([x as u8, y as u8, 40, 255]))
            .save_with_format(dir.path().join(&path), ImageFormat::Png)
            .unwrap();
        entries.push(json!({
            "name": name,
            "sprite_sheet": { "path": path, "frame_count": frame_count }
        }));
    }
    fs::write(
        dir.path().join("catalog.json"),
        json!({ "enemies": entries }).to_string(),
    )
    .unwrap();

    let config = RunConfig::new(dir.path());
    (dir, config)
}
