//! Size classes and the immutable encoded variants produced per frame.

use image::ImageFormat;
use std::fmt;

use crate::encode::{content_type, hash_bytes};
use crate::resize::{ResizeTarget, UNBOUNDED_SCALE};

/// One of the four published sizes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    /// The raw crop, unscaled.
    Default,
    /// 24x24, never upscaled.
    Small,
    /// 36x36, never upscaled.
    Medium,
    /// 56x56, upscaled as needed to fill the canvas.
    Large,
}

impl SizeClass {
    /// Publication order within a frame.
    pub const ALL: [SizeClass; 4] = [
        SizeClass::Default,
        SizeClass::Small,
        SizeClass::Medium,
        SizeClass::Large,
    ];

    /// Name suffix for this size.
    pub fn tag(&self) -> &'static str {
        match self {
            SizeClass::Default => "d",
            SizeClass::Small => "s",
            SizeClass::Medium => "m",
            SizeClass::Large => "l",
        }
    }

    /// Canvas and scale cap, or `None` for the unscaled default.
    pub fn target(&self) -> Option<ResizeTarget> {
        match self {
            SizeClass::Default => None,
            SizeClass::Small => Some(ResizeTarget::new(24, 24, 1.0)),
            SizeClass::Medium => Some(ResizeTarget::new(36, 36, 1.0)),
            SizeClass::Large => Some(ResizeTarget::new(56, 56, UNBOUNDED_SCALE)),
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Published name: `<base_name><frame_index><tag>.<extension>`.
pub fn variant_name(base_name: &str, frame_index: u32, size: SizeClass, extension: &str) -> String {
    format!("{}{}{}.{}", base_name, frame_index, size.tag(), extension)
}

/// One encoded size of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVariant {
    base_name: String,
    frame_index: u32,
    size: SizeClass,
    extension: String,
    format: ImageFormat,
    data: Vec<u8>,
}

impl ImageVariant {
    pub fn new(
        base_name: impl Into<String>,
        frame_index: u32,
        size: SizeClass,
        extension: impl Into<String>,
        format: ImageFormat,
        data: Vec<u8>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            frame_index,
            size,
            extension: extension.into(),
            format,
            data,
        }
    }

    pub fn name(&self) -> String {
        variant_name(&self.base_name, self.frame_index, self.size, &self.extension)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn size(&self) -> SizeClass {
        self.size
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn content_type(&self) -> &'static str {
        content_type(self.format)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// BLAKE3 hex digest of the encoded bytes.
    pub fn hash(&self) -> String {
        hash_bytes(&self.data)
    }
}
