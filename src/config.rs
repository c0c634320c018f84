//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! ```toml
//! [joystick]
//! device_path = ""            # empty: first joystick found in /dev/input
//!
//! [frame]
//! rate_hz = 50
//! log_interval_frames = 500
//!
//! [display]
//! width = 11
//!
//! [[channels]]
//! name = "roll"
//! expr = { axis = 0 }
//! display = { type = "xy_dot", column = 2, axis = "horizontal" }
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::display::{Block, Primitive, XDot, YBar, YDot, DEFAULT_WIDTH};
use crate::error::{FlystickError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub joystick: JoystickConfig,

    #[serde(default)]
    pub frame: FrameConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

/// Input device configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct JoystickConfig {
    #[serde(default)]
    pub device_path: String,
}

/// Control loop timing
#[derive(Debug, Deserialize, Clone)]
pub struct FrameConfig {
    #[serde(default = "default_rate_hz")]
    pub rate_hz: u32,

    #[serde(default = "default_log_interval_frames")]
    pub log_interval_frames: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            log_interval_frames: default_log_interval_frames(),
        }
    }
}

/// LED matrix geometry
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

/// One output channel
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelConfig {
    pub name: String,

    /// Channel expression, see [`crate::mixer::expr`]
    pub expr: toml::Value,

    #[serde(default)]
    pub display: Option<WidgetConfig>,
}

/// Which half of an `xy_dot` a channel drives
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum XyAxis {
    Horizontal,
    Vertical,
}

/// How a channel is drawn
///
/// Coordinates are `[column, height above bottom row]`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetConfig {
    XDot {
        center: (i32, i32),
    },
    YDot {
        column: i32,
    },
    YBar {
        column: i32,
        #[serde(default = "default_bar_width")]
        width: u32,
    },
    Block {
        corner: (i32, i32),
        #[serde(default = "default_block_size")]
        size: (u32, u32),
    },
    XyDot {
        column: i32,
        axis: XyAxis,
    },
}

impl WidgetConfig {
    /// The single-channel primitive for this widget, `None` for `xy_dot`.
    #[must_use]
    pub fn primitive(&self) -> Option<Primitive> {
        match *self {
            WidgetConfig::XDot { center } => Some(Primitive::XDot(XDot::new(center))),
            WidgetConfig::YDot { column } => Some(Primitive::YDot(YDot::new(column))),
            WidgetConfig::YBar { column, width } => Some(Primitive::YBar(YBar::new(column, width))),
            WidgetConfig::Block { corner, size } => Some(Primitive::Block(Block::new(corner, size))),
            WidgetConfig::XyDot { .. } => None,
        }
    }
}

// Default value functions
fn default_rate_hz() -> u32 { 50 }
fn default_log_interval_frames() -> u64 { 500 }
fn default_width() -> usize { DEFAULT_WIDTH }
fn default_bar_width() -> u32 { 1 }
fn default_block_size() -> (u32, u32) { (1, 1) }

fn invalid(msg: impl std::fmt::Display) -> FlystickError {
    FlystickError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flystick::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing or validation fails
    ///
    /// # Examples
    ///
    /// ```
    /// use flystick::config::Config;
    ///
    /// let config = Config::parse(r#"
    /// [[channels]]
    /// name = "throttle"
    /// expr = { unipolar = { axis = 2 } }
    /// display = { type = "y_bar", column = 10 }
    /// "#)?;
    ///
    /// assert_eq!(config.frame.rate_hz, 50);
    /// assert_eq!(config.channels[0].name, "throttle");
    /// # Ok::<(), flystick::error::FlystickError>(())
    /// ```
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Joystick device_path can be empty (auto-detect)

        // Validate frame timing
        if self.frame.rate_hz == 0 || self.frame.rate_hz > 1000 {
            return Err(invalid("rate_hz must be between 1 and 1000"));
        }

        if self.frame.log_interval_frames == 0 {
            return Err(invalid("log_interval_frames must be greater than 0"));
        }

        // Validate display geometry
        if self.display.width == 0 || self.display.width > 64 {
            return Err(invalid("display width must be between 1 and 64"));
        }

        // Validate channel names
        let mut names = HashSet::new();
        for channel in &self.channels {
            if channel.name.trim().is_empty() {
                return Err(invalid("channel name cannot be empty"));
            }
            if !names.insert(channel.name.as_str()) {
                return Err(invalid(format!("duplicate channel name '{}'", channel.name)));
            }
        }

        Ok(())
    }
}
