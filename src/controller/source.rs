//! # Source Adapters
//!
//! Bind joystick inputs to the channel algebra.
//!
//! | Adapter | Frame input | Output |
//! |---------|-------------|--------|
//! | [`Source::Axis`] | normalized axis | -1.0 to 1.0 |
//! | [`Source::Button`] | button state | 1.0 pressed, -1.0 released |
//! | [`ClickSource`] | hat events | signed click stream for a [`Switch`](crate::mixer::Switch) |

use super::frame::{EventFrame, HatAxis};
use crate::error::{FlystickError, Result};

/// A continuous input read straight from the frame.
///
/// Wrap it in a [`Channel`](crate::mixer::Channel) to mix it:
///
/// ```
/// use flystick::controller::frame::EventFrame;
/// use flystick::controller::source::Source;
/// use flystick::mixer::Channel;
///
/// let mut elevator = Channel::from(Source::Axis(1));
/// let frame = EventFrame::new(vec![0.0, -0.5], vec![], vec![]);
/// assert_eq!(elevator.evaluate(&frame), -0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Analog axis by index
    Axis(usize),
    /// Button by index
    Button(usize),
}

impl Source {
    /// Reads the source from a frame.
    #[must_use]
    pub fn sample(&self, frame: &EventFrame) -> f32 {
        match *self {
            Source::Axis(index) => frame.axis(index),
            Source::Button(index) => {
                if frame.button(index) {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// A discrete click stream, filtered out of the frame's hat events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickSource {
    /// One axis of one hat
    Hat { hat: u8, axis: HatAxis },
}

impl ClickSource {
    /// Clicks of `hat` along `axis`.
    #[must_use]
    pub const fn hat(hat: u8, axis: HatAxis) -> Self {
        ClickSource::Hat { hat, axis }
    }

    /// Clicks of a button.
    ///
    /// # Errors
    ///
    /// Always returns `NotImplemented`: button transitions are not turned into clicks.
    pub fn button(button: usize) -> Result<Self> {
        Err(FlystickError::NotImplemented(format!(
            "click stream from button {}",
            button
        )))
    }

    /// Picks a click source from an optional hat and an optional button binding.
    ///
    /// The hat wins when both are given.
    ///
    /// # Errors
    ///
    /// - `NotImplemented` for a button-only binding
    /// - `MissingClickSource` when neither is given
    ///
    /// # Examples
    ///
    /// ```
    /// use flystick::controller::frame::HatAxis;
    /// use flystick::controller::source::ClickSource;
    ///
    /// let source = ClickSource::from_binding(Some((0, HatAxis::Y)), None)?;
    /// assert_eq!(source, ClickSource::hat(0, HatAxis::Y));
    ///
    /// assert!(ClickSource::from_binding(None, Some(3)).is_err());
    /// assert!(ClickSource::from_binding(None, None).is_err());
    /// # Ok::<(), flystick::error::FlystickError>(())
    /// ```
    pub fn from_binding(hat: Option<(u8, HatAxis)>, button: Option<usize>) -> Result<Self> {
        match (hat, button) {
            (Some((hat, axis)), _) => Ok(Self::hat(hat, axis)),
            (None, Some(button)) => Self::button(button),
            (None, None) => Err(FlystickError::MissingClickSource),
        }
    }

    /// Signed clicks of this source in `frame`, in arrival order.
    pub fn clicks<'a>(&self, frame: &'a EventFrame) -> impl Iterator<Item = i8> + 'a {
        let ClickSource::Hat { hat, axis } = *self;
        frame
            .hats()
            .iter()
            .filter(move |event| event.hat == hat)
            .map(move |event| event.value.along(axis))
    }
}
