//! Sprite sheet loading and frame cropping.

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::Path;

use crate::error::{FrameError, FrameResult};
use crate::geometry::FrameRect;

/// A decoded sprite sheet together with its source encoding.
///
/// Pixels are always held as 8-bit RGBA regardless of the source color
/// type, so every frame cut from the sheet keeps an alpha channel.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pixels: RgbaImage,
    format: ImageFormat,
    extension: String,
}

impl SpriteSheet {
    /// Read and decode a sheet from disk.
    pub fn open(path: &Path) -> FrameResult<Self> {
        let bytes = fs::read(path).map_err(|e| FrameError::SourceUnreadable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let extension = path.extension().and_then(|ext| ext.to_str());
        Self::decode(&bytes, &path.display().to_string(), extension)
    }

    /// Decode a sheet from encoded bytes.
    ///
    /// `extension` is the sheet's file extension, used verbatim (case kept)
    /// in published names. When absent, the detected format's canonical
    /// extension is used.
    pub fn decode(bytes: &[u8], source_name: &str, extension: Option<&str>) -> FrameResult<Self> {
        let unreadable = |reason: String| FrameError::SourceUnreadable {
            source_name: source_name.to_string(),
            reason,
        };

        let format = image::guess_format(bytes).map_err(|e| unreadable(e.to_string()))?;
        let pixels = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| unreadable(e.to_string()))?
            .to_rgba8();

        let extension = match extension {
            Some(ext) if !ext.is_empty() => ext.to_string(),
            _ => format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("bin")
                .to_string(),
        };

        Ok(Self {
            pixels,
            format,
            extension,
        })
    }

    /// Wrap already-decoded pixels.
    pub fn from_pixels(pixels: RgbaImage, format: ImageFormat, extension: &str) -> Self {
        Self {
            pixels,
            format,
            extension: extension.to_string(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Copy the pixels under `rect` into a new buffer of exactly that size.
///
/// This is a straight pixel copy with no resampling.
pub fn extract_frame(sheet: &SpriteSheet, rect: FrameRect) -> FrameResult<RgbaImage> {
    if !rect.fits_within(sheet.width(), sheet.height()) {
        return Err(FrameError::OutOfBounds {
            rect,
            sheet_width: sheet.width(),
            sheet_height: sheet.height(),
        });
    }

    let frame =
        image::imageops::crop_imm(&sheet.pixels, rect.x, rect.y, rect.width, rect.height).to_image();
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma, Rgba};
    use std::io::Cursor;

    fn encode(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn quadrant_sheet() -> SpriteSheet {
        // 4x2 sheet, frame_count 2: each 2x1 frame gets its own color.
        let colors = [
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
            Rgba([0, 0, 255, 128]),
            Rgba([0, 0, 0, 0]),
        ];
        let pixels = RgbaImage::from_fn(4, 2, |x, y| colors[(y * 2 + x / 2) as usize]);
        SpriteSheet::from_pixels(pixels, ImageFormat::Png, "png")
    }

    #[test]
    fn test_extract_copies_exact_region() {
        let sheet = quadrant_sheet();
        let frame = extract_frame(&sheet, FrameRect::new(2, 1, 2, 1)).unwrap();
        assert_eq!(frame.dimensions(), (2, 1));
        assert_eq!(*frame.get_pixel(0, 0), Rgba([0, 0, 0, 0]));

        let frame = extract_frame(&sheet, FrameRect::new(0, 1, 2, 1)).unwrap();
        assert_eq!(*frame.get_pixel(1, 0), Rgba([0, 0, 255, 128]));
    }

    #[test]
    fn test_extract_rejects_out_of_bounds() {
        let sheet = quadrant_sheet();
        let err = extract_frame(&sheet, FrameRect::new(3, 0, 2, 1)).unwrap_err();
        assert!(matches!(err, FrameError::OutOfBounds { sheet_width: 4, .. }));
    }

    #[test]
    fn test_grayscale_source_gains_alpha() {
        let gray = GrayImage::from_pixel(6, 4, Luma([200]));
        let bytes = encode(DynamicImage::ImageLuma8(gray));
        let sheet = SpriteSheet::decode(&bytes, "gray.png", Some("png")).unwrap();

        assert_eq!(sheet.format(), ImageFormat::Png);
        assert_eq!(sheet.extension(), "png");

        let frame = extract_frame(&sheet, FrameRect::new(3, 2, 3, 2)).unwrap();
        assert_eq!(frame.dimensions(), (3, 2));
        assert_eq!(*frame.get_pixel(2, 1), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn test_extension_falls_back_to_format() {
        let bytes = encode(DynamicImage::ImageRgba8(RgbaImage::new(2, 2)));
        let sheet = SpriteSheet::decode(&bytes, "memory", None).unwrap();
        assert_eq!(sheet.extension(), "png");
    }

    #[test]
    fn test_extension_case_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bat.PNG");
        std::fs::write(&path, encode(DynamicImage::ImageRgba8(RgbaImage::new(4, 2)))).unwrap();

        let sheet = SpriteSheet::open(&path).unwrap();
        assert_eq!(sheet.format(), ImageFormat::Png);
        assert_eq!(sheet.extension(), "PNG");
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = SpriteSheet::decode(b"not an image", "junk.png", None).unwrap_err();
        assert!(matches!(err, FrameError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = SpriteSheet::open(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, FrameError::SourceUnreadable { .. }));
    }
}
