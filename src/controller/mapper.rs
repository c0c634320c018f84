//! # Controller Input Mapper Module
//!
//! This module folds raw evdev events from a joystick into [`EventFrame`]s.
//!
//! ## Event Types
//!
//! - **EV_ABS (Absolute Axis)**: analog axes and hat switches
//! - **EV_KEY (Key/Button)**: digital buttons
//!
//! ## Indexing
//!
//! Axes and buttons are numbered the way joystick configuration files refer
//! to them: axis `n` is the n-th supported absolute axis (hats excluded) in
//! code order, button `n` is the n-th supported key at or above `BTN_MISC`.
//!
//! ## Hats
//!
//! Hats arrive as `ABS_HAT0X` .. `ABS_HAT3Y` with values -1/0/1. Each change
//! becomes one [`HatEvent`] whose changed axis carries the new value and whose
//! other axis reads 0. evdev reports "up" as -1 on the Y axis; the mapper flips
//! it so up is +1.
//!
//! ## Usage
//!
//! ```
//! use evdev::{AbsoluteAxisType, EventType, InputEvent};
//! use flystick::controller::frame::{HatEvent, HatPosition};
//! use flystick::controller::mapper::{AxisInfo, DeviceLayout, EventMapper};
//!
//! let layout = DeviceLayout {
//!     axes: vec![AxisInfo {
//!         axis: AbsoluteAxisType::ABS_X,
//!         minimum: 0,
//!         maximum: 255,
//!         value: 0,
//!     }],
//!     buttons: vec![],
//! };
//! let mut mapper = EventMapper::new(layout);
//!
//! // Events from Joystick::into_event_stream()
//! mapper.process_event(&InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_X.0, 255));
//! mapper.process_event(&InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_HAT0Y.0, -1));
//!
//! let frame = mapper.take_frame();
//! assert_eq!(frame.axis(0), 1.0);
//! assert_eq!(frame.hats(), &[HatEvent::new(0, HatPosition::new(0, 1))]);
//! ```

use evdev::{AbsoluteAxisType, InputEvent, InputEventKind, Key};

use super::frame::{EventFrame, HatEvent, HatPosition};
use crate::mixer::calibration::normalize_axis;

/// Number of hats evdev can report (`ABS_HAT0X` .. `ABS_HAT3Y`).
pub const MAX_HATS: usize = 4;

/// Range and start value of one analog axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisInfo {
    pub axis: AbsoluteAxisType,
    pub minimum: i32,
    pub maximum: i32,
    pub value: i32,
}

/// Axes and buttons of a device, in configuration index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceLayout {
    pub axes: Vec<AxisInfo>,
    pub buttons: Vec<Key>,
}

/// Returns `Some((hat, is_y))` if `axis` is one of the hat axes.
fn hat_axis(axis: AbsoluteAxisType) -> Option<(u8, bool)> {
    let first = AbsoluteAxisType::ABS_HAT0X.0;
    let last = AbsoluteAxisType::ABS_HAT3Y.0;
    if (first..=last).contains(&axis.0) {
        let offset = axis.0 - first;
        Some(((offset / 2) as u8, offset % 2 == 1))
    } else {
        None
    }
}

/// Whether `axis` is a hat axis rather than an analog one.
#[must_use]
pub fn is_hat_axis(axis: AbsoluteAxisType) -> bool {
    hat_axis(axis).is_some()
}

/// Parses raw evdev events and builds one [`EventFrame`] per evaluation cycle.
///
/// Axis and button values persist across frames; hat events are handed out
/// once by [`EventMapper::take_frame`].
///
/// # Thread Safety
///
/// `EventMapper` is not thread-safe. Use from a single task/thread only.
#[derive(Debug)]
pub struct EventMapper {
    layout: DeviceLayout,
    axes: Vec<f32>,
    buttons: Vec<bool>,
    hats: [HatPosition; MAX_HATS],
    pending: Vec<HatEvent>,
}

impl EventMapper {
    /// Creates a mapper for a device layout, starting from the layout's axis values.
    #[must_use]
    pub fn new(layout: DeviceLayout) -> Self {
        let axes = Self::initial_axes(&layout);
        let buttons = vec![false; layout.buttons.len()];
        Self {
            layout,
            axes,
            buttons,
            hats: [HatPosition::default(); MAX_HATS],
            pending: Vec::new(),
        }
    }

    fn initial_axes(layout: &DeviceLayout) -> Vec<f32> {
        layout
            .axes
            .iter()
            .map(|info| normalize_axis(info.value, info.minimum, info.maximum))
            .collect()
    }

    /// Returns the layout the mapper was built for.
    #[must_use]
    pub fn layout(&self) -> &DeviceLayout {
        &self.layout
    }

    /// Current position of a hat.
    #[must_use]
    pub fn hat_position(&self, hat: usize) -> HatPosition {
        self.hats.get(hat).copied().unwrap_or_default()
    }

    /// Processes a single evdev input event and updates internal state.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event.kind() {
            InputEventKind::AbsAxis(axis) => {
                self.process_axis_event(axis, event.value());
            }
            InputEventKind::Key(key) => {
                self.process_key_event(key, event.value() != 0);
            }
            _ => {
                // Ignore sync events and other event types
            }
        }
    }

    /// Processes an absolute axis event.
    fn process_axis_event(&mut self, axis: AbsoluteAxisType, value: i32) {
        if let Some((hat, is_y)) = hat_axis(axis) {
            self.process_hat_event(hat, is_y, value);
            return;
        }

        if let Some(index) = self.layout.axes.iter().position(|info| info.axis == axis) {
            let info = self.layout.axes[index];
            self.axes[index] = normalize_axis(value, info.minimum, info.maximum);
        }
    }

    fn process_hat_event(&mut self, hat: u8, is_y: bool, value: i32) {
        let direction = value.signum() as i8;
        let position = &mut self.hats[hat as usize];

        let transition = if is_y {
            position.y = -direction;
            HatPosition::new(0, -direction)
        } else {
            position.x = direction;
            HatPosition::new(direction, 0)
        };

        self.pending.push(HatEvent::new(hat, transition));
    }

    /// Processes a key/button event.
    fn process_key_event(&mut self, key: Key, pressed: bool) {
        if let Some(index) = self.layout.buttons.iter().position(|&k| k == key) {
            self.buttons[index] = pressed;
        }
    }

    /// Returns the frame accumulated since the last call.
    ///
    /// Axis and button values are copied; pending hat events are drained.
    pub fn take_frame(&mut self) -> EventFrame {
        EventFrame::new(
            self.axes.clone(),
            self.buttons.clone(),
            std::mem::take(&mut self.pending),
        )
    }
}
