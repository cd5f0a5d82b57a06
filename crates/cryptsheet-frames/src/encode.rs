//! Deterministic variant encoding.
//!
//! PNG output goes through the `png` crate with fixed compression and filter
//! settings so the same pixels always produce the same bytes. Other formats
//! the `image` crate can write are encoded through it directly.

use image::{DynamicImage, ImageFormat, RgbaImage};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use std::io::{Cursor, Write};

use crate::error::{FrameError, FrameResult};

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Must stay fixed between runs.
    pub compression: Compression,
    /// Row filter. Must stay fixed between runs.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smaller files at the cost of encode time.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }
}

/// Write an RGBA buffer as PNG to any writer.
pub fn write_png<W: Write>(
    image: &RgbaImage,
    writer: W,
    config: &PngConfig,
) -> Result<(), png::EncodingError> {
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate writes no timestamps or other variable chunks.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(image.as_raw())?;
    png_writer.finish()?;

    Ok(())
}

/// Encode an RGBA buffer in `format`.
pub fn encode_rgba(
    image: &RgbaImage,
    format: ImageFormat,
    config: &PngConfig,
) -> FrameResult<Vec<u8>> {
    let mut data = Vec::new();

    if format == ImageFormat::Png {
        write_png(image, &mut data, config).map_err(|e| FrameError::encode(format, e))?;
        return Ok(data);
    }

    if !format.writing_enabled() {
        return Err(FrameError::encode(format, "format cannot be written by this build"));
    }
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut data), format)
        .map_err(|e| FrameError::encode(format, e))?;

    Ok(data)
}

/// Decode encoded frame bytes back into RGBA pixels.
pub fn decode_rgba(data: &[u8]) -> FrameResult<(RgbaImage, ImageFormat)> {
    let format = image::guess_format(data).map_err(|e| FrameError::Decode(e.to_string()))?;
    let image = image::load_from_memory_with_format(data, format)
        .map_err(|e| FrameError::Decode(e.to_string()))?;
    Ok((image.to_rgba8(), format))
}

/// MIME type published alongside data in `format`.
pub fn content_type(format: ImageFormat) -> &'static str {
    format.to_mime_type()
}

/// BLAKE3 hex digest of encoded data.
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
