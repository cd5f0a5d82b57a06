//! Aspect-preserving, centered frame resizing.
//!
//! A frame is scaled uniformly to fit a fixed square canvas and centered on
//! it. The scale is capped by the target's `max_scale`, so a cap of `1.0`
//! only ever shrinks. Canvas pixels not covered by the scaled frame stay
//! fully transparent.
//!
//! Sampling is bilinear on premultiplied alpha. When shrinking, each canvas
//! pixel averages a grid of bilinear taps spread across its footprint.

use image::{Rgba, RgbaImage};

use crate::encode::{decode_rgba, encode_rgba, PngConfig};
use crate::error::{FrameError, FrameResult};

/// Scale cap that never limits upscaling.
pub const UNBOUNDED_SCALE: f32 = f32::MAX;

/// Upper bound on taps per axis when shrinking.
const MAX_TAPS: u32 = 16;

/// Canvas size and scale cap for one resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
    pub max_scale: f32,
}

impl ResizeTarget {
    pub fn new(width: u32, height: u32, max_scale: f32) -> Self {
        Self {
            width,
            height,
            max_scale,
        }
    }
}

/// Where and how large a source frame lands on the target canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePlan {
    pub scale: f32,
    pub dest_width: f32,
    pub dest_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ScalePlan {
    /// Fit a `source_width` x `source_height` frame onto `target`.
    ///
    /// The scale is the smallest of the two axis ratios and the cap, and is
    /// never allowed to reach zero.
    pub fn compute(source_width: u32, source_height: u32, target: ResizeTarget) -> Self {
        let scale_x = target.width as f32 / source_width as f32;
        let scale_y = target.height as f32 / source_height as f32;
        let scale = scale_x
            .min(scale_y)
            .min(target.max_scale)
            .max(f32::from_bits(1));

        let dest_width = source_width as f32 * scale;
        let dest_height = source_height as f32 * scale;

        Self {
            scale,
            dest_width,
            dest_height,
            offset_x: (target.width as f32 - dest_width) / 2.0,
            offset_y: (target.height as f32 - dest_height) / 2.0,
        }
    }

    fn contains_x(&self, x: f32) -> bool {
        x >= self.offset_x && x < self.offset_x + self.dest_width
    }

    fn contains_y(&self, y: f32) -> bool {
        y >= self.offset_y && y < self.offset_y + self.dest_height
    }

    /// Supersampling taps per axis: one when enlarging or copying.
    fn taps_per_axis(&self) -> u32 {
        if self.scale >= 1.0 {
            1
        } else {
            ((1.0 / self.scale).ceil() as u32).clamp(1, MAX_TAPS)
        }
    }
}

type Premultiplied = [f32; 4];

fn premultiply(pixel: &Rgba<u8>) -> Premultiplied {
    let a = pixel[3] as f32 / 255.0;
    [
        pixel[0] as f32 / 255.0 * a,
        pixel[1] as f32 / 255.0 * a,
        pixel[2] as f32 / 255.0 * a,
        a,
    ]
}

fn unpremultiply(color: Premultiplied) -> Rgba<u8> {
    let alpha = (color[3].clamp(0.0, 1.0) * 255.0).round() as u8;
    if alpha == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a = color[3];
    let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(color[0]), channel(color[1]), channel(color[2]), alpha])
}

/// Bilinear sample at source pixel coordinates, clamping to the edges.
fn sample_bilinear(pixels: &[Premultiplied], width: u32, height: u32, x: f32, y: f32) -> Premultiplied {
    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let at = |px: u32, py: u32| pixels[(py * width + px) as usize];
    let c00 = at(x0, y0);
    let c10 = at(x1, y0);
    let c01 = at(x0, y1);
    let c11 = at(x1, y1);

    let mut out = [0.0; 4];
    for i in 0..4 {
        let top = c00[i] + (c10[i] - c00[i]) * fx;
        let bottom = c01[i] + (c11[i] - c01[i]) * fx;
        out[i] = top + (bottom - top) * fy;
    }
    out
}

/// Render `frame` centered on a transparent `target` canvas.
pub fn resize_frame(frame: &RgbaImage, target: ResizeTarget) -> FrameResult<RgbaImage> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidInput(format!(
            "cannot resize an empty {}x{} frame",
            width, height
        )));
    }

    let plan = ScalePlan::compute(width, height, target);
    let taps = plan.taps_per_axis();
    let step = 1.0 / taps as f32;
    let tap_count = (taps * taps) as f32;
    let source: Vec<Premultiplied> = frame.pixels().map(premultiply).collect();

    let mut canvas = RgbaImage::new(target.width, target.height);
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let mut sum = [0.0f32; 4];

        for j in 0..taps {
            let dy = y as f32 + (j as f32 + 0.5) * step;
            if !plan.contains_y(dy) {
                continue;
            }
            let sy = (dy - plan.offset_y) / plan.scale - 0.5;

            for i in 0..taps {
                let dx = x as f32 + (i as f32 + 0.5) * step;
                if !plan.contains_x(dx) {
                    continue;
                }
                let sx = (dx - plan.offset_x) / plan.scale - 0.5;

                let sample = sample_bilinear(&source, width, height, sx, sy);
                for c in 0..4 {
                    sum[c] += sample[c];
                }
            }
        }

        *pixel = unpremultiply(sum.map(|c| c / tap_count));
    }

    Ok(canvas)
}

/// Decode an encoded frame, resize it, and re-encode in the same format.
pub fn resize_encoded(data: &[u8], target: ResizeTarget, config: &PngConfig) -> FrameResult<Vec<u8>> {
    let (frame, format) = decode_rgba(data)?;
    let resized = resize_frame(&frame, target)?;
    encode_rgba(&resized, format, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_small_sprite_not_upscaled() {
        let plan = ScalePlan::compute(16, 16, ResizeTarget::new(24, 24, 1.0));
        assert_eq!(plan.scale, 1.0);
        assert_eq!(plan.dest_width, 16.0);
        assert_eq!(plan.offset_x, 4.0);
        assert_eq!(plan.offset_y, 4.0);
    }

    #[test]
    fn test_large_sprite_downscaled_to_fit() {
        let plan = ScalePlan::compute(48, 32, ResizeTarget::new(24, 24, 1.0));
        assert_eq!(plan.scale, 0.5);
        assert_eq!(plan.dest_width, 24.0);
        assert_eq!(plan.dest_height, 16.0);
        assert_eq!(plan.offset_x, 0.0);
        assert_eq!(plan.offset_y, 4.0);
    }

    #[test]
    fn test_unbounded_cap_fills_limiting_axis() {
        let plan = ScalePlan::compute(10, 40, ResizeTarget::new(56, 56, UNBOUNDED_SCALE));
        assert!((plan.scale - 1.4).abs() < 1e-6);
        assert!((plan.dest_height - 56.0).abs() < 1e-4);
        assert!((plan.offset_x - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_fractional_offset_is_kept() {
        let plan = ScalePlan::compute(15, 15, ResizeTarget::new(24, 24, 1.0));
        assert_eq!(plan.offset_x, 4.5);
    }

    #[test]
    fn test_scale_never_zero() {
        let plan = ScalePlan::compute(16, 16, ResizeTarget::new(0, 0, 1.0));
        assert!(plan.scale > 0.0);
    }

    #[test]
    fn test_copy_at_unit_scale_is_centered_and_exact() {
        let frame = RgbaImage::from_pixel(16, 16, RED);
        let out = resize_frame(&frame, ResizeTarget::new(24, 24, 1.0)).unwrap();

        assert_eq!(out.dimensions(), (24, 24));
        assert_eq!(*out.get_pixel(3, 12), CLEAR);
        assert_eq!(*out.get_pixel(4, 4), RED);
        assert_eq!(*out.get_pixel(19, 19), RED);
        assert_eq!(*out.get_pixel(20, 12), CLEAR);
        assert_eq!(*out.get_pixel(12, 20), CLEAR);
    }

    #[test]
    fn test_downscale_solid_stays_solid() {
        let color = Rgba([40, 120, 200, 255]);
        let frame = RgbaImage::from_pixel(48, 48, color);
        let out = resize_frame(&frame, ResizeTarget::new(24, 24, 1.0)).unwrap();
        assert!(out.pixels().all(|p| *p == color));
    }

    #[test]
    fn test_upscale_letterboxes_narrow_sprite() {
        let frame = RgbaImage::from_pixel(10, 40, RED);
        let out = resize_frame(&frame, ResizeTarget::new(56, 56, UNBOUNDED_SCALE)).unwrap();

        assert_eq!(*out.get_pixel(20, 28), CLEAR);
        assert_eq!(*out.get_pixel(21, 28), RED);
        assert_eq!(*out.get_pixel(34, 0), RED);
        assert_eq!(*out.get_pixel(35, 55), CLEAR);
    }

    #[test]
    fn test_transparent_neighbours_do_not_darken() {
        // Opaque white next to fully transparent black.
        let frame = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                CLEAR
            }
        });
        let out = resize_frame(&frame, ResizeTarget::new(8, 8, UNBOUNDED_SCALE)).unwrap();
        for pixel in out.pixels().filter(|p| p[3] > 0) {
            assert_eq!(&pixel.0[..3], &[255, 255, 255]);
        }
    }

    #[test]
    fn test_empty_frame_rejected() {
        let err = resize_frame(&RgbaImage::new(0, 4), ResizeTarget::new(24, 24, 1.0)).unwrap_err();
        assert!(matches!(err, FrameError::InvalidInput(_)));
    }

    #[test]
    fn test_resize_encoded_round_trip() {
        let frame = RgbaImage::from_pixel(16, 16, RED);
        let config = PngConfig::default();
        let data = encode_rgba(&frame, ImageFormat::Png, &config).unwrap();

        let resized = resize_encoded(&data, ResizeTarget::new(36, 36, 1.0), &config).unwrap();
        let (decoded, format) = decode_rgba(&resized).unwrap();

        assert_eq!(format, ImageFormat::Png);
        assert_eq!(decoded, resize_frame(&frame, ResizeTarget::new(36, 36, 1.0)).unwrap());
    }

    #[test]
    fn test_resize_encoded_rejects_garbage() {
        let err = resize_encoded(b"nope", ResizeTarget::new(24, 24, 1.0), &PngConfig::default())
            .unwrap_err();
        assert!(matches!(err, FrameError::Decode(_)));
    }
}
