//! # Error Types
//!
//! Custom error types for Flystick using `thiserror`.

use thiserror::Error;

/// Main error type for Flystick
#[derive(Debug, Error)]
pub enum FlystickError {
    /// A binary channel operator got something that is neither a number nor a channel
    #[error("Invalid operand: expected a number or a channel, got {0}")]
    InvalidOperand(String),

    /// A channel expression table is malformed
    #[error("Invalid channel expression: {0}")]
    InvalidExpression(String),

    /// Switch built with fewer than two positions
    #[error("Switch needs at least 2 steps, got {0}")]
    InvalidSteps(u32),

    /// Switch start position outside `0..steps`
    #[error("Switch initial step {initial} is out of range for {steps} steps")]
    InvalidInitialStep { initial: u32, steps: u32 },

    /// Capability that exists in the configuration language but has no implementation
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Click stream requested without a hat or a button
    #[error("Click source requires a hat or a button")]
    MissingClickSource,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Joystick device errors
    #[error("Controller error: {0}")]
    Controller(String),

    /// No joystick found while scanning input devices
    #[error("No joystick found in /dev/input")]
    ControllerNotFound,
}

/// Result type alias for Flystick
pub type Result<T> = std::result::Result<T, FlystickError>;
