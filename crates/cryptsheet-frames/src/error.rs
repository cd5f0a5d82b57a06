//! Errors raised while turning a sprite sheet into frame variants.

use thiserror::Error;

use crate::geometry::FrameRect;

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that can occur during frame extraction, resizing, or encoding.
///
/// Every variant is fatal for the entity being processed.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Frame count below one, missing sheet path, or degenerate frame size.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The sheet could not be read or decoded.
    #[error("sprite sheet '{source_name}' is unreadable: {reason}")]
    SourceUnreadable { source_name: String, reason: String },

    /// A frame rectangle does not fit inside the sheet.
    #[error("frame {rect} exceeds sheet bounds {sheet_width}x{sheet_height}")]
    OutOfBounds {
        rect: FrameRect,
        sheet_width: u32,
        sheet_height: u32,
    },

    /// An intermediate frame buffer could not be decoded.
    #[error("failed to decode frame buffer: {0}")]
    Decode(String),

    /// A variant could not be serialized in the source encoding.
    #[error("failed to encode {format} variant: {reason}")]
    Encode { format: String, reason: String },
}

impl FrameError {
    pub(crate) fn encode(format: image::ImageFormat, reason: impl ToString) -> Self {
        FrameError::Encode {
            format: format!("{:?}", format),
            reason: reason.to_string(),
        }
    }
}
