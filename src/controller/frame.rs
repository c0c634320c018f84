//! # Event Frame
//!
//! The per-frame input bundle handed to every channel expression.
//!
//! One frame carries a snapshot of all axis and button values plus the hat
//! transitions that happened since the previous frame. The same frame is
//! passed unchanged through the whole expression tree of a single evaluation.

/// One axis of a hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatAxis {
    /// Left (-1) / right (+1)
    X,
    /// Down (-1) / up (+1)
    Y,
}

/// Direction of a hat switch, `-1`, `0` or `1` on each axis.
///
/// `y` is positive when pushed up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HatPosition {
    pub x: i8,
    pub y: i8,
}

impl HatPosition {
    /// Creates a hat position.
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Returns the component along one axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use flystick::controller::frame::{HatAxis, HatPosition};
    ///
    /// let up_left = HatPosition::new(-1, 1);
    /// assert_eq!(up_left.along(HatAxis::X), -1);
    /// assert_eq!(up_left.along(HatAxis::Y), 1);
    /// ```
    #[must_use]
    pub const fn along(self, axis: HatAxis) -> i8 {
        match axis {
            HatAxis::X => self.x,
            HatAxis::Y => self.y,
        }
    }
}

/// A hat transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatEvent {
    /// Hat index (0 for the first hat of the device)
    pub hat: u8,
    /// Direction of the transition
    pub value: HatPosition,
}

impl HatEvent {
    #[must_use]
    pub const fn new(hat: u8, value: HatPosition) -> Self {
        Self { hat, value }
    }
}

/// Input available for one evaluation cycle.
///
/// # Examples
///
/// ```
/// use flystick::controller::frame::{EventFrame, HatEvent, HatPosition};
///
/// let frame = EventFrame::new(
///     vec![0.25, -1.0],
///     vec![true],
///     vec![HatEvent::new(0, HatPosition::new(1, 0))],
/// );
///
/// assert_eq!(frame.axis(1), -1.0);
/// assert!(frame.button(0));
/// assert_eq!(frame.hats().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFrame {
    axes: Vec<f32>,
    buttons: Vec<bool>,
    hats: Vec<HatEvent>,
}

impl EventFrame {
    /// Creates a frame from axis values (-1.0 to 1.0), button states and hat events.
    #[must_use]
    pub fn new(axes: Vec<f32>, buttons: Vec<bool>, hats: Vec<HatEvent>) -> Self {
        Self {
            axes,
            buttons,
            hats,
        }
    }

    /// Normalized value of axis `index`, or 0.0 (center) if the device has no such axis.
    #[must_use]
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// State of button `index`, released if the device has no such button.
    #[must_use]
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Hat events of this frame, in arrival order.
    #[must_use]
    pub fn hats(&self) -> &[HatEvent] {
        &self.hats
    }

    pub fn axes(&self) -> &[f32] {
        &self.axes
    }

    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }
}
