//! # Mixer Module
//!
//! The channel algebra.
//!
//! This module handles:
//! - Composing channels with negate/add/subtract/multiply/rescale
//! - Multi-position switches driven by hat clicks
//! - Deadzone and expo conditioning
//! - Building channels from TOML expressions

pub mod calibration;
pub mod channel;
pub mod expr;
pub mod switch;

pub use calibration::Calibration;
pub use channel::{Channel, Operand};
pub use switch::Switch;
