//! # Display Module
//!
//! Output side: a fixed 5-row LED matrix (Scroll pHAT geometry by default).
//!
//! This module handles:
//! - The [`Display`] sink the rendering primitives draw into
//! - [`FrameBuffer`], an in-memory display used by the control loop and tests
//! - Rendering primitives that turn a channel value into pixels ([`primitives`])
//!
//! ## Coordinates
//!
//! Columns count from the left, rows from the top (row 0 to row 4). Primitives
//! work with `y` counted upward from the bottom row and convert with
//! `row = 4 - y`.

use std::fmt;

pub mod primitives;

pub use primitives::{Block, Primitive, Render, XDot, XyDot, YBar, YDot};

/// Number of rows on the matrix.
pub const GRID_HEIGHT: usize = 5;

/// Default matrix width (Scroll pHAT: 11 columns).
pub const DEFAULT_WIDTH: usize = 11;

/// Column mask with every row lit.
pub const FULL_COLUMN: u8 = (1 << GRID_HEIGHT) - 1;

/// Pixel sink of a 5-row display.
///
/// Bit `r` of a column mask is row `r` (row 0 at the top).
#[cfg_attr(test, mockall::automock)]
pub trait Display {
    /// Switches one pixel on or off.
    fn set_pixel(&mut self, col: usize, row: usize, on: bool);

    /// Replaces a whole column with a row bitmask.
    fn set_col(&mut self, col: usize, mask: u8);
}

/// In-memory display.
///
/// Writes outside the configured width or below the last row are ignored.
///
/// # Examples
///
/// ```
/// use flystick::display::{Display, FrameBuffer};
///
/// let mut fb = FrameBuffer::new(3);
/// fb.set_pixel(1, 4, true);
/// fb.set_col(2, 0b00011);
///
/// assert!(fb.is_lit(1, 4));
/// assert_eq!(fb.to_string(), "..#\n..#\n...\n...\n.#.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    columns: Vec<u8>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl FrameBuffer {
    /// Creates a blank buffer `width` columns wide.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            columns: vec![0; width],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Switches every pixel off.
    pub fn clear(&mut self) {
        self.columns.iter_mut().for_each(|c| *c = 0);
    }

    /// Whether a pixel is on. Out-of-range pixels read as off.
    #[must_use]
    pub fn is_lit(&self, col: usize, row: usize) -> bool {
        row < GRID_HEIGHT && self.column(col) & (1 << row) != 0
    }

    /// Row bitmask of a column, 0 outside the buffer.
    #[must_use]
    pub fn column(&self, col: usize) -> u8 {
        self.columns.get(col).copied().unwrap_or(0)
    }

    /// Number of pixels that are on.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.columns.iter().map(|c| c.count_ones() as usize).sum()
    }
}

impl Display for FrameBuffer {
    fn set_pixel(&mut self, col: usize, row: usize, on: bool) {
        if row >= GRID_HEIGHT {
            return;
        }
        if let Some(column) = self.columns.get_mut(col) {
            if on {
                *column |= 1 << row;
            } else {
                *column &= !(1 << row);
            }
        }
    }

    fn set_col(&mut self, col: usize, mask: u8) {
        if let Some(column) = self.columns.get_mut(col) {
            *column = mask & FULL_COLUMN;
        }
    }
}

/// One text line per row, `#` for lit pixels.
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_HEIGHT {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..self.width() {
                f.write_str(if self.is_lit(col, row) { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
