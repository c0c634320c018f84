//! # Flystick Library
//!
//! Fly RC models with a USB joystick.
//!
//! Joystick axes, buttons and hat switches are read through evdev, mixed by a
//! small channel algebra ([`mixer::Channel`], [`mixer::Switch`]) and shown on a
//! 5-row LED matrix through a handful of rendering primitives.
//!
//! ```
//! use flystick::controller::frame::EventFrame;
//! use flystick::controller::source::Source;
//! use flystick::mixer::Channel;
//!
//! // Reverse + offset + weight
//! let mut aileron = (-Channel::from(Source::Axis(0)) + 0.1) * 0.5;
//!
//! let frame = EventFrame::new(vec![0.5], vec![], vec![]);
//! assert!((aileron.evaluate(&frame) - (-0.2)).abs() < 1e-6);
//! ```

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod mixer;
pub mod model;
