//! # Channel Module
//!
//! Implements channel mixing.
//!
//! A [`Channel`] is an expression over joystick inputs that evaluates to one
//! number per frame. Channels are built once and combined with ordinary
//! arithmetic; every combination produces a new channel.
//!
//! ## Mix Examples
//!
//! | Mix | Expression |
//! |-----|------------|
//! | Reverse | `-axis(0)` |
//! | Offset | `axis(0) - 0.1` |
//! | Weight | `axis(0) * 0.5` |
//! | Mixing | `axis(0) - axis(1) * 0.5` |
//! | Trim | `axis(0) - switch * 0.5` |
//! | All of the above | `(-axis(0) + 0.1) * 0.7 - switch * 0.5` |
//!
//! [`Channel::rescale_unipolar`] maps the usual -1..1 output onto 0..1.
//!
//! No operator clamps its result.
//!
//! ## Usage
//!
//! ```
//! use flystick::controller::frame::{EventFrame, HatAxis, HatEvent, HatPosition};
//! use flystick::controller::source::{ClickSource, Source};
//! use flystick::mixer::{Channel, Switch};
//!
//! let trim = Switch::new(ClickSource::hat(0, HatAxis::X), 5, 2)?;
//! let mut aileron = (-Channel::from(Source::Axis(0)) + 0.1) * 0.7 - Channel::from(trim) * 0.5;
//!
//! let frame = EventFrame::new(vec![0.1], vec![], vec![HatEvent::new(0, HatPosition::new(1, 0))]);
//! // trim moved to step 3 of 5 -> 0.5
//! assert!((aileron.evaluate(&frame) - (-0.25)).abs() < 1e-6);
//! # Ok::<(), flystick::error::FlystickError>(())
//! ```

use std::ops::{Add, Mul, Neg, Sub};

use super::calibration::Calibration;
use super::switch::Switch;
use crate::controller::frame::EventFrame;
use crate::controller::source::Source;

/// Right-hand side of a binary channel operator.
#[derive(Debug)]
pub enum Operand {
    /// Fixed number
    Constant(f32),
    /// Another channel, evaluated on the same frame
    Channel(Channel),
}

impl Operand {
    fn evaluate(&mut self, frame: &EventFrame) -> f32 {
        match self {
            Operand::Constant(value) => *value,
            Operand::Channel(channel) => channel.evaluate(frame),
        }
    }
}

impl From<f32> for Operand {
    fn from(value: f32) -> Self {
        Operand::Constant(value)
    }
}

impl From<Channel> for Operand {
    fn from(channel: Channel) -> Self {
        Operand::Channel(channel)
    }
}

impl From<Switch> for Operand {
    fn from(switch: Switch) -> Self {
        Operand::Channel(Channel::from(switch))
    }
}

#[derive(Debug)]
enum Node {
    Source(Source),
    Switch(Switch),
    Negate(Channel),
    Add(Channel, Operand),
    Subtract(Channel, Operand),
    Multiply(Channel, Operand),
    Unipolar(Channel),
    Calibrate(Channel, Calibration),
}

/// A per-frame signal expression.
///
/// Evaluation takes `&mut self` because a [`Switch`] inside the tree advances
/// on the clicks of the frame. Channels own their subexpressions, so one
/// switch cannot be shared by two channels.
#[derive(Debug)]
pub struct Channel(Box<Node>);

impl Channel {
    fn node(node: Node) -> Self {
        Channel(Box::new(node))
    }

    /// Evaluates the expression for one frame.
    pub fn evaluate(&mut self, frame: &EventFrame) -> f32 {
        match &mut *self.0 {
            Node::Source(source) => source.sample(frame),
            Node::Switch(switch) => switch.evaluate(frame),
            Node::Negate(channel) => -channel.evaluate(frame),
            Node::Add(channel, operand) => channel.evaluate(frame) + operand.evaluate(frame),
            Node::Subtract(channel, operand) => channel.evaluate(frame) - operand.evaluate(frame),
            Node::Multiply(channel, operand) => channel.evaluate(frame) * operand.evaluate(frame),
            Node::Unipolar(channel) => 0.5 + channel.evaluate(frame) / 2.0,
            Node::Calibrate(channel, calibration) => calibration.apply(channel.evaluate(frame)),
        }
    }

    /// `-self`
    #[must_use]
    pub fn negate(self) -> Channel {
        Channel::node(Node::Negate(self))
    }

    /// `self + operand`
    #[must_use]
    pub fn add(self, operand: impl Into<Operand>) -> Channel {
        Channel::node(Node::Add(self, operand.into()))
    }

    /// `self - operand`
    #[must_use]
    pub fn subtract(self, operand: impl Into<Operand>) -> Channel {
        Channel::node(Node::Subtract(self, operand.into()))
    }

    /// `self * operand`, for weights and for gating by another channel.
    #[must_use]
    pub fn multiply(self, operand: impl Into<Operand>) -> Channel {
        Channel::node(Node::Multiply(self, operand.into()))
    }

    /// `0.5 + self / 2`: maps -1..1 onto 0..1.
    ///
    /// # Examples
    ///
    /// ```
    /// use flystick::controller::frame::EventFrame;
    /// use flystick::controller::source::Source;
    /// use flystick::mixer::Channel;
    ///
    /// let mut throttle = Channel::from(Source::Axis(0)).rescale_unipolar();
    /// let frame = EventFrame::new(vec![-1.0], vec![], vec![]);
    /// assert_eq!(throttle.evaluate(&frame), 0.0);
    /// ```
    #[must_use]
    pub fn rescale_unipolar(self) -> Channel {
        Channel::node(Node::Unipolar(self))
    }

    /// Applies a deadzone/expo curve to the result.
    #[must_use]
    pub fn calibrate(self, calibration: Calibration) -> Channel {
        Channel::node(Node::Calibrate(self, calibration))
    }
}

impl From<Source> for Channel {
    fn from(source: Source) -> Self {
        Channel::node(Node::Source(source))
    }
}

impl From<Switch> for Channel {
    fn from(switch: Switch) -> Self {
        Channel::node(Node::Switch(switch))
    }
}

impl Neg for Channel {
    type Output = Channel;

    fn neg(self) -> Channel {
        self.negate()
    }
}

impl Add<f32> for Channel {
    type Output = Channel;

    fn add(self, rhs: f32) -> Channel {
        Channel::add(self, rhs)
    }
}

impl Add<Channel> for Channel {
    type Output = Channel;

    fn add(self, rhs: Channel) -> Channel {
        Channel::add(self, rhs)
    }
}

impl Sub<f32> for Channel {
    type Output = Channel;

    fn sub(self, rhs: f32) -> Channel {
        self.subtract(rhs)
    }
}

impl Sub<Channel> for Channel {
    type Output = Channel;

    fn sub(self, rhs: Channel) -> Channel {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Channel {
    type Output = Channel;

    fn mul(self, rhs: f32) -> Channel {
        self.multiply(rhs)
    }
}

impl Mul<Channel> for Channel {
    type Output = Channel;

    fn mul(self, rhs: Channel) -> Channel {
        self.multiply(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::frame::{HatAxis, HatEvent, HatPosition};
    use crate::controller::source::ClickSource;

    fn axis(index: usize) -> Channel {
        Channel::from(Source::Axis(index))
    }

    fn frame(axes: &[f32]) -> EventFrame {
        EventFrame::new(axes.to_vec(), vec![], vec![])
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    // ==================== Unary Operator Tests ====================

    #[test]
    fn test_negate() {
        let f = frame(&[0.3]);
        assert_close(axis(0).negate().evaluate(&f), -0.3);
        assert_close((-axis(0)).evaluate(&f), -0.3);
    }

    #[test]
    fn test_double_negate() {
        let f = frame(&[0.7]);
        assert_close((-(-axis(0))).evaluate(&f), 0.7);
    }

    #[test]
    fn test_rescale_unipolar() {
        assert_close(axis(0).rescale_unipolar().evaluate(&frame(&[-1.0])), 0.0);
        assert_close(axis(0).rescale_unipolar().evaluate(&frame(&[0.0])), 0.5);
        assert_close(axis(0).rescale_unipolar().evaluate(&frame(&[1.0])), 1.0);
        assert_close(axis(0).rescale_unipolar().evaluate(&frame(&[-0.5])), 0.25);
    }

    #[test]
    fn test_rescale_unipolar_is_not_negate() {
        let f = frame(&[0.5]);
        assert_close(axis(0).rescale_unipolar().evaluate(&f), 0.75);
    }

    // ==================== Binary Operator Tests ====================

    #[test]
    fn test_add_constant() {
        let f = frame(&[0.25]);
        assert_close((axis(0) + 0.5).evaluate(&f), 0.75);
        assert_close(axis(0).add(0.5_f32).evaluate(&f), 0.75);
    }

    #[test]
    fn test_add_channel() {
        let f = frame(&[0.25, -0.5]);
        assert_close((axis(0) + axis(1)).evaluate(&f), -0.25);
    }

    #[test]
    fn test_subtract() {
        let f = frame(&[0.25, -0.5]);
        assert_close((axis(0) - 0.1).evaluate(&f), 0.15);
        assert_close((axis(0) - axis(1)).evaluate(&f), 0.75);
    }

    #[test]
    fn test_multiply() {
        let f = frame(&[0.5, -0.5]);
        assert_close((axis(0) * 0.5).evaluate(&f), 0.25);
        assert_close((axis(0) * axis(1)).evaluate(&f), -0.25);
    }

    #[test]
    fn test_no_clamping() {
        let f = frame(&[1.0, 1.0]);
        assert_close((axis(0) + axis(1)).evaluate(&f), 2.0);
        assert_close((axis(0) * 3.0).evaluate(&f), 3.0);
    }

    #[test]
    fn test_mixing_precedence() {
        // axis(0) - axis(1) * 0.5
        let f = frame(&[0.5, 0.4]);
        assert_close((axis(0) - axis(1) * 0.5).evaluate(&f), 0.3);
    }

    #[test]
    fn test_reverse_offset_weight() {
        // (-axis(0) + 0.1) * 0.7
        let f = frame(&[0.5]);
        assert_close(((-axis(0) + 0.1) * 0.7).evaluate(&f), -0.28);
    }

    #[test]
    fn test_button_channel() {
        let f = EventFrame::new(vec![], vec![true], vec![]);
        let mut channel = Channel::from(Source::Button(0)) * 0.5;
        assert_close(channel.evaluate(&f), 0.5);
    }

    #[test]
    fn test_calibrate() {
        let mut channel = axis(0).calibrate(Calibration::new(0.1, 0.0));
        assert_close(channel.evaluate(&frame(&[0.05])), 0.0);
        assert_close(channel.evaluate(&frame(&[1.0])), 1.0);
    }

    // ==================== Switch Mixing Tests ====================

    #[test]
    fn test_trim_with_switch() {
        let trim = Switch::new(ClickSource::hat(0, HatAxis::X), 3, 1).unwrap();
        let mut channel = axis(0) - Channel::from(trim) * 0.5;

        // Switch in the middle -> 0.0, no trim
        assert_close(channel.evaluate(&frame(&[0.2])), 0.2);

        // One click right -> switch at 1.0
        let clicked = EventFrame::new(
            vec![0.2],
            vec![],
            vec![HatEvent::new(0, HatPosition::new(1, 0))],
        );
        assert_close(channel.evaluate(&clicked), -0.3);

        // State persists into the next frame
        assert_close(channel.evaluate(&frame(&[0.2])), -0.3);
    }

    #[test]
    fn test_switch_as_operand() {
        let gate = Switch::new(ClickSource::hat(0, HatAxis::Y), 2, 1).unwrap();
        let mut channel = axis(0).multiply(gate);
        assert_close(channel.evaluate(&frame(&[0.4])), 0.4);
    }

    #[test]
    fn test_evaluation_is_repeatable_without_switch() {
        let mut channel = (axis(0) + axis(1)) * 0.5;
        let f = frame(&[0.2, 0.4]);
        let first = channel.evaluate(&f);
        let second = channel.evaluate(&f);
        assert_eq!(first, second);
    }
}
