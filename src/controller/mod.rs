//! # Controller Module
//!
//! Joystick input handling.
//!
//! This module handles:
//! - Joystick detection and connection via evdev
//! - Folding raw axis, button and hat events into per-frame [`frame::EventFrame`]s
//! - Binding axes, buttons and hats to the channel algebra

pub mod frame;
pub mod joystick;
pub mod mapper;
pub mod source;
