//! # Rendering Primitives
//!
//! Turn a channel value (-1.0 to 1.0) into pixels.
//!
//! | Primitive | Shows | Footprint |
//! |-----------|-------|-----------|
//! | [`XDot`] | one dot moving left/right | 5 columns on one row |
//! | [`YDot`] | one dot moving up/down | 1 column |
//! | [`XyDot`] | one dot driven by two channels | 5x5 |
//! | [`YBar`] | bar growing from the bottom | `width` columns |
//! | [`Block`] | on/off rectangle | `size` |
//!
//! Positions are rounded half up (`floor(v + 0.5)`), so a stick resting
//! exactly between two pixels always shows on the upper/right one.

use tracing::trace;

use super::{Display, GRID_HEIGHT};

/// Column masks for bar heights 0 to 5, filled from the bottom row.
pub const BAR_MASKS: [u8; GRID_HEIGHT + 1] = [0b00000, 0b10000, 0b11000, 0b11100, 0b11110, 0b11111];

/// Anything that draws a channel value.
pub trait Render {
    fn render(&mut self, value: f32, display: &mut dyn Display);
}

/// Rounds to the nearest integer, halves towards positive infinity.
///
/// # Examples
///
/// ```
/// use flystick::display::primitives::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3);
/// assert_eq!(round_half_up(-0.5), 0);
/// assert_eq!(round_half_up(-0.6), -1);
/// ```
#[must_use]
pub fn round_half_up(value: f32) -> i32 {
    (f64::from(value) + 0.5).floor() as i32
}

/// Dot offset from center, -2 to 2 for values in -1..1.
///
/// Unbounded values saturate; callers add it with `saturating_add`.
fn offset(value: f32) -> i32 {
    round_half_up(value * 2.0)
}

/// Lights the pixel at column `x`, height `y` above the bottom row.
fn plot(display: &mut dyn Display, x: i32, y: i32) {
    let height = GRID_HEIGHT as i32;
    if x < 0 || !(0..height).contains(&y) {
        trace!("Skipping off-grid pixel ({}, {})", x, y);
        return;
    }
    display.set_pixel(x as usize, (height - 1 - y) as usize, true);
}

/// Horizontal dot around a center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XDot {
    x: i32,
    y: i32,
}

impl XDot {
    /// `center` is `(column, height above bottom row)`.
    #[must_use]
    pub fn new(center: (i32, i32)) -> Self {
        Self {
            x: center.0,
            y: center.1,
        }
    }
}

impl Render for XDot {
    fn render(&mut self, value: f32, display: &mut dyn Display) {
        plot(display, self.x.saturating_add(offset(value)), self.y);
    }
}

/// Vertical dot in one column, centered on the middle row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YDot {
    column: i32,
}

impl YDot {
    #[must_use]
    pub fn new(column: i32) -> Self {
        Self { column }
    }
}

impl Render for YDot {
    fn render(&mut self, value: f32, display: &mut dyn Display) {
        plot(display, self.column, offset(value).saturating_add(2));
    }
}

/// One dot placed by two channels, typically the X and Y axes of one stick.
///
/// [`XyDot::horizontal`] and [`XyDot::vertical`] must both run once per frame.
/// Whichever runs first only stores its coordinate; the second draws the
/// combined pixel and clears both. A frame that runs only one of them draws
/// nothing and leaves its coordinate pending.
///
/// # Examples
///
/// ```
/// use flystick::display::{FrameBuffer, XyDot};
///
/// let mut dot = XyDot::new(8);
/// let mut fb = FrameBuffer::default();
///
/// dot.vertical(1.0, &mut fb);
/// assert_eq!(fb.lit_count(), 0);
///
/// dot.horizontal(-1.0, &mut fb);
/// assert!(fb.is_lit(6, 0));
/// assert!(!dot.is_pending());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XyDot {
    column: i32,
    x: Option<i32>,
    y: Option<i32>,
}

impl XyDot {
    /// `column` is the center column; the dot spans `column - 2 ..= column + 2`.
    #[must_use]
    pub fn new(column: i32) -> Self {
        Self {
            column,
            x: None,
            y: None,
        }
    }

    /// Renders the horizontal half.
    pub fn horizontal(&mut self, value: f32, display: &mut dyn Display) {
        let x = self.column.saturating_add(offset(value));
        match self.y {
            Some(y) => self.draw(display, x, y),
            None => self.x = Some(x),
        }
    }

    /// Renders the vertical half.
    pub fn vertical(&mut self, value: f32, display: &mut dyn Display) {
        let y = offset(value).saturating_add(2);
        match self.x {
            Some(x) => self.draw(display, x, y),
            None => self.y = Some(y),
        }
    }

    fn draw(&mut self, display: &mut dyn Display, x: i32, y: i32) {
        plot(display, x, y);
        self.x = None;
        self.y = None;
    }

    /// Whether one half has run without the other.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    #[must_use]
    pub fn column(&self) -> i32 {
        self.column
    }
}

/// Bar graph growing up from the bottom row.
///
/// Height is `round((value + 1) / 2 * 5)`, 0 to 5 pixels; each column is
/// written whole with [`Display::set_col`], so a bar also blanks whatever
/// else was in its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YBar {
    column: i32,
    width: u32,
}

impl YBar {
    #[must_use]
    pub fn new(column: i32, width: u32) -> Self {
        Self { column, width }
    }

    /// Bar height for a value, clamped to the grid.
    #[must_use]
    pub fn height(value: f32) -> usize {
        round_half_up((value + 1.0) / 2.0 * GRID_HEIGHT as f32).clamp(0, GRID_HEIGHT as i32) as usize
    }
}

impl Render for YBar {
    fn render(&mut self, value: f32, display: &mut dyn Display) {
        let mask = BAR_MASKS[Self::height(value)];
        for dx in 0..self.width {
            let Some(col) = i32::try_from(dx).ok().and_then(|dx| self.column.checked_add(dx)) else {
                break;
            };
            if col >= 0 {
                display.set_col(col as usize, mask);
            }
        }
    }
}

/// On/off rectangle, lit while the value is zero or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    corner: (i32, i32),
    size: (u32, u32),
}

impl Block {
    /// `corner` is the bottom-left pixel `(column, height above bottom row)`.
    #[must_use]
    pub fn new(corner: (i32, i32), size: (u32, u32)) -> Self {
        Self { corner, size }
    }
}

impl Render for Block {
    fn render(&mut self, value: f32, display: &mut dyn Display) {
        if value.is_nan() || value < 0.0 {
            return;
        }
        let (x0, y0) = self.corner;
        for dx in 0..self.size.0 as i32 {
            for dy in 0..self.size.1 as i32 {
                plot(display, x0.saturating_add(dx), y0.saturating_add(dy));
            }
        }
    }
}

/// A single-channel primitive chosen at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    XDot(XDot),
    YDot(YDot),
    YBar(YBar),
    Block(Block),
}

impl Render for Primitive {
    fn render(&mut self, value: f32, display: &mut dyn Display) {
        match self {
            Primitive::XDot(p) => p.render(value, display),
            Primitive::YDot(p) => p.render(value, display),
            Primitive::YBar(p) => p.render(value, display),
            Primitive::Block(p) => p.render(value, display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{FrameBuffer, MockDisplay, FULL_COLUMN};
    use mockall::predicate::eq;

    fn lit(fb: &FrameBuffer) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        for col in 0..fb.width() {
            for row in 0..GRID_HEIGHT {
                if fb.is_lit(col, row) {
                    pixels.push((col, row));
                }
            }
        }
        pixels
    }

    // ==================== Rounding Tests ====================

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(-1.51), -2);
    }

    #[test]
    fn test_offset_range() {
        assert_eq!(offset(-1.0), -2);
        assert_eq!(offset(-0.5), -1);
        assert_eq!(offset(0.0), 0);
        assert_eq!(offset(0.25), 1);
        assert_eq!(offset(-0.25), 0);
        assert_eq!(offset(1.0), 2);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        // Largest f32 below 0.5; adding 0.5 in f32 would round up to 1.0
        assert_eq!(round_half_up(0.499_999_97), 0);
        assert_eq!(round_half_up(-0.500_000_06), -1);
        assert_eq!(round_half_up(2.499_999_8), 2);
    }

    #[test]
    fn test_round_half_up_saturates() {
        assert_eq!(round_half_up(f32::INFINITY), i32::MAX);
        assert_eq!(round_half_up(f32::NEG_INFINITY), i32::MIN);
        assert_eq!(round_half_up(f32::NAN), 0);
    }

    // ==================== Unbounded Value Tests ====================

    const HUGE_VALUES: [f32; 4] = [2.0e9, -2.0e9, f32::INFINITY, f32::NEG_INFINITY];

    #[test]
    fn test_xdot_huge_values_off_grid() {
        for value in HUGE_VALUES {
            let mut fb = FrameBuffer::default();
            XDot::new((5, 2)).render(value, &mut fb);
            assert_eq!(fb.lit_count(), 0, "value {}", value);
        }
    }

    #[test]
    fn test_ydot_huge_values_skipped() {
        for value in HUGE_VALUES {
            let mut display = MockDisplay::new();
            display.expect_set_pixel().never();
            YDot::new(3).render(value, &mut display);
        }
    }

    #[test]
    fn test_xydot_huge_values_off_grid() {
        for value in HUGE_VALUES {
            let mut fb = FrameBuffer::default();
            let mut dot = XyDot::new(8);
            dot.horizontal(value, &mut fb);
            dot.vertical(0.0, &mut fb);
            assert_eq!(fb.lit_count(), 0, "horizontal {}", value);

            dot.vertical(value, &mut fb);
            dot.horizontal(0.0, &mut fb);
            assert_eq!(fb.lit_count(), 0, "vertical {}", value);
            assert!(!dot.is_pending());
        }
    }

    #[test]
    fn test_ybar_and_block_huge_values() {
        let mut fb = FrameBuffer::default();
        YBar::new(0, 1).render(f32::INFINITY, &mut fb);
        YBar::new(1, 1).render(f32::NEG_INFINITY, &mut fb);
        Block::new((3, 0), (1, 1)).render(f32::INFINITY, &mut fb);
        assert_eq!(fb.column(0), FULL_COLUMN);
        assert_eq!(fb.column(1), 0);
        assert!(fb.is_lit(3, 4));
    }

    #[test]
    fn test_ybar_width_at_column_limit() {
        let mut display = MockDisplay::new();
        display
            .expect_set_col()
            .with(eq(i32::MAX as usize), eq(FULL_COLUMN))
            .times(1)
            .return_const(());

        YBar::new(i32::MAX, 3).render(1.0, &mut display);
    }

    // ==================== XDot Tests ====================

    #[test]
    fn test_xdot_center() {
        let mut display = MockDisplay::new();
        display
            .expect_set_pixel()
            .with(eq(5), eq(2), eq(true))
            .times(1)
            .return_const(());

        XDot::new((5, 2)).render(0.0, &mut display);
    }

    #[test]
    fn test_xdot_extremes() {
        let mut fb = FrameBuffer::default();
        let mut dot = XDot::new((5, 0));
        dot.render(1.0, &mut fb);
        dot.render(-1.0, &mut fb);
        assert_eq!(lit(&fb), vec![(3, 4), (7, 4)]);
    }

    #[test]
    fn test_xdot_off_grid_skipped() {
        let mut display = MockDisplay::new();
        display.expect_set_pixel().never();

        XDot::new((0, 2)).render(-1.0, &mut display);
    }

    // ==================== YDot Tests ====================

    #[test]
    fn test_ydot_positions() {
        let mut fb = FrameBuffer::default();
        let mut dot = YDot::new(0);

        dot.render(1.0, &mut fb);
        assert_eq!(lit(&fb), vec![(0, 0)]);

        fb.clear();
        dot.render(0.0, &mut fb);
        assert_eq!(lit(&fb), vec![(0, 2)]);

        fb.clear();
        dot.render(-1.0, &mut fb);
        assert_eq!(lit(&fb), vec![(0, 4)]);
    }

    #[test]
    fn test_ydot_out_of_range_value_skipped() {
        let mut display = MockDisplay::new();
        display.expect_set_pixel().never();

        YDot::new(3).render(2.0, &mut display);
    }

    // ==================== XyDot Tests ====================

    #[test]
    fn test_xydot_horizontal_only_draws_nothing() {
        let mut display = MockDisplay::new();
        display.expect_set_pixel().never();

        let mut dot = XyDot::new(8);
        dot.horizontal(0.5, &mut display);
        assert!(dot.is_pending());
    }

    #[test]
    fn test_xydot_pair_draws_once_and_clears() {
        let mut display = MockDisplay::new();
        display
            .expect_set_pixel()
            .with(eq(10), eq(0), eq(true))
            .times(1)
            .return_const(());

        let mut dot = XyDot::new(8);
        dot.horizontal(1.0, &mut display);
        dot.vertical(1.0, &mut display);
        assert!(!dot.is_pending());
    }

    #[test]
    fn test_xydot_order_irrelevant() {
        let mut first = FrameBuffer::default();
        let mut dot = XyDot::new(8);
        dot.horizontal(-0.5, &mut first);
        dot.vertical(0.5, &mut first);

        let mut second = FrameBuffer::default();
        let mut dot = XyDot::new(8);
        dot.vertical(0.5, &mut second);
        dot.horizontal(-0.5, &mut second);

        assert_eq!(first, second);
        assert_eq!(lit(&first), vec![(7, 1)]);
    }

    #[test]
    fn test_xydot_consecutive_frames() {
        let mut fb = FrameBuffer::default();
        let mut dot = XyDot::new(2);

        dot.horizontal(0.0, &mut fb);
        dot.vertical(0.0, &mut fb);
        fb.clear();
        dot.vertical(-1.0, &mut fb);
        dot.horizontal(1.0, &mut fb);

        assert_eq!(lit(&fb), vec![(4, 4)]);
    }

    #[test]
    fn test_xydot_stale_half_pairs_with_next_frame() {
        let mut fb = FrameBuffer::default();
        let mut dot = XyDot::new(2);

        // Frame 1: only horizontal ran
        dot.horizontal(1.0, &mut fb);
        // Frame 2: vertical pairs with the stored x
        dot.vertical(0.0, &mut fb);

        assert_eq!(lit(&fb), vec![(4, 2)]);
    }

    // ==================== YBar Tests ====================

    #[test]
    fn test_bar_masks() {
        assert_eq!(BAR_MASKS[0], 0);
        assert_eq!(BAR_MASKS[GRID_HEIGHT], FULL_COLUMN);
        for (height, mask) in BAR_MASKS.iter().enumerate() {
            assert_eq!(mask.count_ones() as usize, height);
        }
    }

    #[test]
    fn test_ybar_heights() {
        assert_eq!(YBar::height(-1.0), 0);
        assert_eq!(YBar::height(0.0), 3);
        assert_eq!(YBar::height(1.0), 5);
        assert_eq!(YBar::height(-0.6), 1);
        assert_eq!(YBar::height(3.0), 5);
        assert_eq!(YBar::height(-3.0), 0);
    }

    #[test]
    fn test_ybar_min_blanks_column() {
        let mut display = MockDisplay::new();
        display
            .expect_set_col()
            .with(eq(10), eq(0))
            .times(1)
            .return_const(());

        YBar::new(10, 1).render(-1.0, &mut display);
    }

    #[test]
    fn test_ybar_max_fills_column() {
        let mut display = MockDisplay::new();
        display
            .expect_set_col()
            .with(eq(10), eq(FULL_COLUMN))
            .times(1)
            .return_const(());

        YBar::new(10, 1).render(1.0, &mut display);
    }

    #[test]
    fn test_ybar_center_and_width() {
        let mut fb = FrameBuffer::default();
        YBar::new(0, 2).render(0.0, &mut fb);
        assert_eq!(fb.column(0), 0b11100);
        assert_eq!(fb.column(1), 0b11100);
        assert_eq!(fb.column(2), 0);
        assert_eq!(fb.lit_count(), 6);
    }

    // ==================== Block Tests ====================

    #[test]
    fn test_block_below_zero_draws_nothing() {
        let mut display = MockDisplay::new();
        display.expect_set_pixel().never();

        Block::new((5, 0), (1, 1)).render(-0.0001, &mut display);
    }

    #[test]
    fn test_block_at_zero_draws() {
        let mut display = MockDisplay::new();
        display
            .expect_set_pixel()
            .with(eq(5), eq(4), eq(true))
            .times(1)
            .return_const(());

        Block::new((5, 0), (1, 1)).render(0.0, &mut display);
    }

    #[test]
    fn test_block_fills_rectangle() {
        let mut fb = FrameBuffer::default();
        Block::new((1, 3), (3, 2)).render(0.7, &mut fb);
        assert_eq!(
            lit(&fb),
            vec![(1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1)]
        );
    }

    #[test]
    fn test_block_nan_draws_nothing() {
        let mut fb = FrameBuffer::default();
        Block::new((0, 0), (2, 2)).render(f32::NAN, &mut fb);
        assert_eq!(fb.lit_count(), 0);
    }

    // ==================== Primitive Tests ====================

    #[test]
    fn test_primitive_dispatch() {
        let mut fb = FrameBuffer::default();
        let mut primitives = [
            Primitive::XDot(XDot::new((2, 0))),
            Primitive::YDot(YDot::new(5)),
            Primitive::YBar(YBar::new(10, 1)),
            Primitive::Block(Block::new((7, 4), (1, 1))),
        ];
        for primitive in primitives.iter_mut() {
            primitive.render(1.0, &mut fb);
        }
        assert!(fb.is_lit(4, 4));
        assert!(fb.is_lit(5, 0));
        assert_eq!(fb.column(10), FULL_COLUMN);
        assert!(fb.is_lit(7, 0));
    }
}
