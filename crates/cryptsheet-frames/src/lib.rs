//! cryptsheet Frame Library
//!
//! Turns two-row sprite sheets into per-frame image variants. For every frame
//! of a sheet four encodings are produced: the raw crop and three resized
//! copies centered on 24x24, 36x36 and 56x56 transparent canvases.
//!
//! # Pipeline
//!
//! 1. [`SheetGeometry`] derives frame rectangles from sheet size and frame count
//! 2. [`extract_frame`] crops one frame into its own RGBA buffer
//! 3. [`resize_frame`] fits a frame onto a canvas using [`ScalePlan`]
//! 4. [`FrameSetBuilder`] drives the above for a whole sheet and names each
//!    [`ImageVariant`]
//!
//! # Example
//!
//! ```
//! use cryptsheet_frames::{FrameSetBuilder, SpriteSheet};
//! use image::{ImageFormat, Rgba, RgbaImage};
//!
//! let pixels = RgbaImage::from_pixel(128, 64, Rgba([200, 40, 40, 255]));
//! let sheet = SpriteSheet::from_pixels(pixels, ImageFormat::Png, "png");
//!
//! let variants = FrameSetBuilder::new().build("enemies/BatA", &sheet, 4).unwrap();
//! assert_eq!(variants.len(), 32);
//! assert_eq!(variants[0].name(), "enemies/BatA0d.png");
//! ```
//!
//! # Determinism
//!
//! The same sheet always yields byte-identical variants: sampling is pure
//! arithmetic and PNG output uses a fixed [`PngConfig`].

pub mod encode;
pub mod error;
pub mod extract;
pub mod frame_set;
pub mod geometry;
pub mod resize;
pub mod variant;

pub use encode::{content_type, decode_rgba, encode_rgba, hash_bytes, PngConfig};
pub use error::{FrameError, FrameResult};
pub use extract::{extract_frame, SpriteSheet};
pub use frame_set::FrameSetBuilder;
pub use geometry::{FrameIndex, FrameRect, SheetGeometry, SHEET_ROWS};
pub use resize::{resize_encoded, resize_frame, ResizeTarget, ScalePlan, UNBOUNDED_SCALE};
pub use variant::{variant_name, ImageVariant, SizeClass};
