//! Frame geometry for two-row sprite sheets.
//!
//! Every sheet is a grid of `frame_count` columns by two rows of equally
//! sized frames:
//!
//! - Top row: normal sprites
//! - Bottom row: shadow sprites
//!
//! Frame sizes use integer division, so any remainder columns or rows at
//! the right and bottom edges are dropped.

use std::fmt;

use crate::error::{FrameError, FrameResult};

/// Number of sprite rows in every sheet.
pub const SHEET_ROWS: u32 = 2;

/// A frame's location within its sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, `None` on overflow.
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on overflow.
    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.height)
    }

    /// Whether the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        matches!((self.right(), self.bottom()), (Some(r), Some(b)) if r <= width && b <= height)
    }
}

impl fmt::Display for FrameRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Row and column of a frame within the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameIndex {
    pub row: u32,
    pub column: u32,
}

impl FrameIndex {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Row-major index: `row * frame_count + column`.
    pub fn linear(&self, frame_count: u32) -> u32 {
        self.row * frame_count + self.column
    }
}

/// Per-frame dimensions derived from a sheet's size and frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    frame_count: u32,
    frame_width: u32,
    frame_height: u32,
}

impl SheetGeometry {
    /// Derive frame dimensions for a sheet.
    ///
    /// Fails with [`FrameError::InvalidInput`] when `frame_count` is below one
    /// or the sheet is too small to hold a single pixel per frame.
    pub fn new(sheet_width: u32, sheet_height: u32, frame_count: i32) -> FrameResult<Self> {
        if frame_count < 1 {
            return Err(FrameError::InvalidInput(format!(
                "frame count must be at least 1, got {}",
                frame_count
            )));
        }
        let frame_count = frame_count as u32;
        let frame_width = sheet_width / frame_count;
        let frame_height = sheet_height / SHEET_ROWS;

        if frame_width == 0 || frame_height == 0 {
            return Err(FrameError::InvalidInput(format!(
                "sheet {}x{} is too small for {} frames in {} rows",
                sheet_width, sheet_height, frame_count, SHEET_ROWS
            )));
        }

        Ok(Self {
            frame_count,
            frame_width,
            frame_height,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Total frames across both rows.
    pub fn total_frames(&self) -> u32 {
        self.frame_count * SHEET_ROWS
    }

    /// Rectangle of the frame at `index`.
    pub fn frame_rect(&self, index: FrameIndex) -> FrameResult<FrameRect> {
        if index.row >= SHEET_ROWS || index.column >= self.frame_count {
            return Err(FrameError::InvalidInput(format!(
                "frame (row {}, column {}) is outside a {}x{} grid",
                index.row, index.column, self.frame_count, SHEET_ROWS
            )));
        }
        Ok(FrameRect::new(
            index.column * self.frame_width,
            index.row * self.frame_height,
            self.frame_width,
            self.frame_height,
        ))
    }

    /// All frames in row-major order.
    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, FrameRect)> + '_ {
        (0..SHEET_ROWS).flat_map(move |row| {
            (0..self.frame_count).map(move |column| {
                let index = FrameIndex::new(row, column);
                let rect = FrameRect::new(
                    column * self.frame_width,
                    row * self.frame_height,
                    self.frame_width,
                    self.frame_height,
                );
                (index, rect)
            })
        })
    }
}
