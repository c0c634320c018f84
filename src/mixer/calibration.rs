//! # Calibration Module
//!
//! Deadzone and exponential curves for stick channels.
//!
//! ## Deadzone
//!
//! A deadzone eliminates small stick movements near center to prevent drift.
//! Values within the deadzone are mapped to center (0.0), while values outside
//! are scaled to use the full range.
//!
//! ## Exponential Curves
//!
//! Expo curves make small stick movements less sensitive while maintaining
//! full deflection at the endpoints.
//!
//! The formula used is: `output = (1 - expo) * input + expo * input³`
//!
//! ## Usage
//!
//! ```
//! use flystick::controller::frame::EventFrame;
//! use flystick::controller::source::Source;
//! use flystick::mixer::{Calibration, Channel};
//!
//! let mut rudder = Channel::from(Source::Axis(3)).calibrate(Calibration::new(0.05, 0.3));
//!
//! let frame = EventFrame::new(vec![0.0, 0.0, 0.0, 0.02], vec![], vec![]);
//! assert_eq!(rudder.evaluate(&frame), 0.0);
//! ```

/// Largest accepted deadzone fraction.
pub const MAX_DEADZONE: f32 = 0.25;

/// Applies deadzone and exponential curve to a normalized input.
///
/// Input and output are in the range -1.0 to 1.0, where 0.0 is center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Deadzone as a fraction (0.0 to 0.25).
    deadzone: f32,
    /// Exponential curve factor (0.0 to 1.0).
    expo: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::linear()
    }
}

impl Calibration {
    /// Creates a new calibration with specified deadzone and expo.
    ///
    /// # Arguments
    ///
    /// * `deadzone` - Deadzone fraction (0.0 to 0.25). Values outside this range are clamped.
    /// * `expo` - Exponential curve factor (0.0 to 1.0). 0.0 = linear, 1.0 = max curve.
    #[must_use]
    pub fn new(deadzone: f32, expo: f32) -> Self {
        Self {
            deadzone: deadzone.clamp(0.0, MAX_DEADZONE),
            expo: expo.clamp(0.0, 1.0),
        }
    }

    /// Creates a linear calibration (no deadzone, no expo).
    #[must_use]
    pub fn linear() -> Self {
        Self {
            deadzone: 0.0,
            expo: 0.0,
        }
    }

    /// Returns the configured deadzone value.
    #[must_use]
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Returns the configured expo value.
    #[must_use]
    pub fn expo(&self) -> f32 {
        self.expo
    }

    /// Applies deadzone and expo curve to a normalized input.
    ///
    /// # Examples
    ///
    /// ```
    /// use flystick::mixer::Calibration;
    ///
    /// let cal = Calibration::new(0.05, 0.3);
    ///
    /// // Within deadzone
    /// assert_eq!(cal.apply(0.02), 0.0);
    /// assert_eq!(cal.apply(-0.02), 0.0);
    ///
    /// // Full deflection preserved
    /// assert!((cal.apply(1.0) - 1.0).abs() < 0.001);
    /// assert!((cal.apply(-1.0) - (-1.0)).abs() < 0.001);
    /// ```
    #[must_use]
    pub fn apply(&self, input: f32) -> f32 {
        let sign = input.signum();
        let after_deadzone = self.apply_deadzone(input.abs());
        sign * self.apply_expo(after_deadzone)
    }

    /// Maps values within deadzone to 0, and scales remaining range to 0..1.
    #[inline]
    fn apply_deadzone(&self, abs_input: f32) -> f32 {
        if abs_input <= self.deadzone {
            0.0
        } else {
            (abs_input - self.deadzone) / (1.0 - self.deadzone)
        }
    }

    #[inline]
    fn apply_expo(&self, input: f32) -> f32 {
        if self.expo == 0.0 {
            input
        } else {
            (1.0 - self.expo) * input + self.expo * input * input * input
        }
    }
}

/// Converts a raw evdev axis value to a normalized value (-1.0 to 1.0).
///
/// `minimum` maps to -1.0 and `maximum` to 1.0. A degenerate range reads as center.
///
/// # Examples
///
/// ```
/// use flystick::mixer::calibration::normalize_axis;
///
/// assert!((normalize_axis(0, 0, 255) - (-1.0)).abs() < 0.01);
/// assert!((normalize_axis(128, 0, 255) - 0.0).abs() < 0.01);
/// assert!((normalize_axis(255, 0, 255) - 1.0).abs() < 0.01);
/// ```
#[must_use]
pub fn normalize_axis(raw: i32, minimum: i32, maximum: i32) -> f32 {
    if maximum <= minimum {
        return 0.0;
    }
    let span = maximum as f32 - minimum as f32;
    let clamped = raw.clamp(minimum, maximum);
    (clamped as f32 - minimum as f32) / span * 2.0 - 1.0
}
