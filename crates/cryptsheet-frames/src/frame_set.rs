//! Per-entity frame set construction.
//!
//! A sheet is decoded once, then every frame is cropped and emitted in four
//! sizes. Processing stops at the first error; a sheet that fails once will
//! not yield meaningful later frames.

use cryptsheet_catalog::{DataRoot, SpriteSource};
use std::path::Path;

use crate::encode::{encode_rgba, PngConfig};
use crate::error::{FrameError, FrameResult};
use crate::extract::{extract_frame, SpriteSheet};
use crate::geometry::SheetGeometry;
use crate::resize::resize_frame;
use crate::variant::{ImageVariant, SizeClass};

/// Builds the ordered variant list for one entity's sheet.
#[derive(Debug, Clone, Default)]
pub struct FrameSetBuilder {
    png: PngConfig,
}

impl FrameSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_png_config(png: PngConfig) -> Self {
        Self { png }
    }

    /// Slice a decoded sheet into variants.
    ///
    /// Output order is row-major by frame, then `d`, `s`, `m`, `l` within
    /// each frame.
    pub fn build(
        &self,
        base_name: &str,
        sheet: &SpriteSheet,
        frame_count: i32,
    ) -> FrameResult<Vec<ImageVariant>> {
        let geometry = SheetGeometry::new(sheet.width(), sheet.height(), frame_count)?;
        let format = sheet.format();
        let mut variants = Vec::with_capacity(geometry.total_frames() as usize * SizeClass::ALL.len());

        for (index, rect) in geometry.frames() {
            let frame_index = index.linear(geometry.frame_count());
            let frame = extract_frame(sheet, rect)?;

            for size in SizeClass::ALL {
                let data = match size.target() {
                    None => encode_rgba(&frame, format, &self.png)?,
                    Some(target) => encode_rgba(&resize_frame(&frame, target)?, format, &self.png)?,
                };
                variants.push(ImageVariant::new(
                    base_name,
                    frame_index,
                    size,
                    sheet.extension(),
                    format,
                    data,
                ));
            }
        }

        Ok(variants)
    }

    /// Load the sheet at `path` and slice it.
    ///
    /// The frame count is checked before touching the file.
    pub fn build_from_path(
        &self,
        base_name: &str,
        path: Option<&Path>,
        frame_count: i32,
    ) -> FrameResult<Vec<ImageVariant>> {
        if frame_count < 1 {
            return Err(FrameError::InvalidInput(format!(
                "'{}' has frame count {}, expected at least 1",
                base_name, frame_count
            )));
        }
        let path = path.ok_or_else(|| {
            FrameError::InvalidInput(format!("'{}' has no sprite sheet path", base_name))
        })?;

        let sheet = SpriteSheet::open(path)?;
        self.build(base_name, &sheet, frame_count)
    }

    /// Build all variants for a catalog entity.
    pub fn build_source<S>(&self, source: &S, root: &DataRoot) -> FrameResult<Vec<ImageVariant>>
    where
        S: SpriteSource + ?Sized,
    {
        let path = source.sheet_path(root);
        self.build_from_path(&source.base_name(), path.as_deref(), source.frame_count())
    }
}
