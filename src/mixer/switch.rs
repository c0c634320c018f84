//! # Switch Module
//!
//! A multi-position switch driven by hat clicks.
//!
//! The switch keeps a step in `0..steps`. Every positive click in a frame
//! moves it up, every negative click moves it down, both with wraparound;
//! zero clicks (hat released) are ignored. The step is reported as a channel
//! value spread evenly over -1..1:
//!
//! | steps | step values |
//! |-------|-------------|
//! | 2 | -1, 1 |
//! | 3 | -1, 0, 1 |
//! | 4 | -1, -1/3, 1/3, 1 |

use super::channel::Channel;
use crate::controller::frame::EventFrame;
use crate::controller::source::ClickSource;
use crate::error::{FlystickError, Result};

/// Stateful step quantizer.
///
/// # Examples
///
/// ```
/// use flystick::controller::frame::{EventFrame, HatAxis, HatEvent, HatPosition};
/// use flystick::controller::source::ClickSource;
/// use flystick::mixer::Switch;
///
/// let mut mode = Switch::new(ClickSource::hat(0, HatAxis::Y), 3, 0)?;
/// assert_eq!(mode.evaluate(&EventFrame::default()), -1.0);
///
/// let up = EventFrame::new(vec![], vec![], vec![HatEvent::new(0, HatPosition::new(0, 1))]);
/// assert_eq!(mode.evaluate(&up), 0.0);
/// assert_eq!(mode.step(), 1);
/// # Ok::<(), flystick::error::FlystickError>(())
/// ```
#[derive(Debug)]
pub struct Switch {
    source: ClickSource,
    steps: u32,
    step: u32,
}

impl Switch {
    /// Creates a switch with `steps` positions, starting at `initial`.
    ///
    /// # Errors
    ///
    /// - `InvalidSteps` if `steps < 2`
    /// - `InvalidInitialStep` if `initial >= steps`
    pub fn new(source: ClickSource, steps: u32, initial: u32) -> Result<Self> {
        if steps < 2 {
            return Err(FlystickError::InvalidSteps(steps));
        }
        if initial >= steps {
            return Err(FlystickError::InvalidInitialStep { initial, steps });
        }
        Ok(Self {
            source,
            steps,
            step: initial,
        })
    }

    /// Current step, `0..steps`.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Number of positions.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Consumes this frame's clicks and returns the resulting position.
    pub fn evaluate(&mut self, frame: &EventFrame) -> f32 {
        for click in self.source.clicks(frame) {
            self.step = next_step(self.step, click, self.steps);
        }
        self.position()
    }

    /// The current step mapped onto -1..1.
    #[must_use]
    pub fn position(&self) -> f32 {
        2.0 * self.step as f32 / (self.steps - 1) as f32 - 1.0
    }

    /// Wraps the switch in a channel.
    #[must_use]
    pub fn into_channel(self) -> Channel {
        Channel::from(self)
    }
}

fn next_step(step: u32, click: i8, steps: u32) -> u32 {
    match click {
        c if c > 0 => (step + 1) % steps,
        c if c < 0 => step.checked_sub(1).unwrap_or(steps - 1),
        _ => step,
    }
}
