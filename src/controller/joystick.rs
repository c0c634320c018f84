//! # Joystick Module
//!
//! This module handles joystick detection, connection, and input reading
//! using the Linux evdev interface.
//!
//! ## Joystick Detection
//!
//! A device counts as a joystick when it reports analog `ABS_X` and at least
//! one joystick or gamepad button (`BTN_TRIGGER` or `BTN_SOUTH`). Keyboards,
//! mice and touchpads are skipped.

use evdev::{AbsoluteAxisType, Device, EventStream, Key};
use std::path::Path;
use tracing::{debug, info};

use super::mapper::{is_hat_axis, AxisInfo, DeviceLayout};
use crate::error::{FlystickError, Result};

/// First key code counted as a joystick button.
const BTN_MISC: u16 = 0x100;

/// Joystick handle
///
/// Represents an open evdev joystick device.
pub struct Joystick {
    device: Device,
    device_path: String,
}

impl std::fmt::Debug for Joystick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Joystick")
            .field("device_path", &self.device_path)
            .field("name", &self.device.name())
            .finish_non_exhaustive()
    }
}

impl Joystick {
    /// Detect and open the first available joystick
    ///
    /// Scans all `/dev/input/event*` devices in path order.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: No joystick found on the system
    /// - `Controller`: `/dev/input` missing or unreadable
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flystick::controller::joystick::Joystick;
    ///
    /// let joystick = Joystick::open()?;
    /// println!("Connected to joystick at: {}", joystick.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open() -> Result<Self> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(FlystickError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| FlystickError::Controller(format!("Failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                FlystickError::Controller(format!("Failed to read directory entry: {}", e))
            })?;

        // Sort entries for deterministic device selection when several joysticks are connected
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            // Only check event* devices
            match path.file_name() {
                Some(name) if name.to_string_lossy().starts_with("event") => {}
                _ => continue,
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if is_joystick(&device) {
                        let device_path = path.to_string_lossy().to_string();
                        info!(
                            "Found joystick {:?} at: {}",
                            device.name().unwrap_or("unnamed"),
                            device_path
                        );
                        return Ok(Self {
                            device,
                            device_path,
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(FlystickError::ControllerNotFound)
    }

    /// Open a joystick at a known device path
    ///
    /// # Errors
    ///
    /// Returns `Controller` if the device cannot be opened or is not a joystick.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path).map_err(|e| {
            FlystickError::Controller(format!("Failed to open {}: {}", path.display(), e))
        })?;

        if !is_joystick(&device) {
            return Err(FlystickError::Controller(format!(
                "{} is not a joystick",
                path.display()
            )));
        }

        info!(
            "Opened joystick {:?} at: {}",
            device.name().unwrap_or("unnamed"),
            path.display()
        );
        Ok(Self {
            device,
            device_path: path.to_string_lossy().to_string(),
        })
    }

    /// Open the configured device, or auto-detect when `device_path` is empty.
    pub fn open_configured(device_path: &str) -> Result<Self> {
        if device_path.is_empty() {
            Self::open()
        } else {
            Self::open_path(device_path)
        }
    }

    /// Get the device path of this joystick
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Get joystick name from evdev
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Read the axis ranges, current axis values and button list of the device.
    ///
    /// # Errors
    ///
    /// Returns `Controller` if the absolute axis state cannot be queried.
    pub fn layout(&self) -> Result<DeviceLayout> {
        let abs_state = self
            .device
            .get_abs_state()
            .map_err(|e| FlystickError::Controller(format!("Failed to read axis state: {}", e)))?;

        let axes = self
            .device
            .supported_absolute_axes()
            .map(|axes| {
                axes.iter()
                    .filter(|axis| !is_hat_axis(*axis))
                    .map(|axis| {
                        let info = abs_state[axis.0 as usize];
                        AxisInfo {
                            axis,
                            minimum: info.minimum,
                            maximum: info.maximum,
                            value: info.value,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let buttons = self
            .device
            .supported_keys()
            .map(|keys| keys.iter().filter(|key| key.code() >= BTN_MISC).collect())
            .unwrap_or_default();

        let layout = DeviceLayout { axes, buttons };
        debug!(
            "Joystick layout: {} axes, {} buttons",
            layout.axes.len(),
            layout.buttons.len()
        );
        Ok(layout)
    }

    /// Turn the joystick into an async event stream for the tokio control loop.
    pub fn into_event_stream(self) -> Result<EventStream> {
        self.device
            .into_event_stream()
            .map_err(|e| FlystickError::Controller(format!("Failed to create event stream: {}", e)))
    }
}

/// Whether a device looks like a joystick or gamepad.
fn is_joystick(device: &Device) -> bool {
    let has_stick = device
        .supported_absolute_axes()
        .map_or(false, |axes| axes.contains(AbsoluteAxisType::ABS_X));
    let has_buttons = device.supported_keys().map_or(false, |keys| {
        keys.contains(Key::BTN_TRIGGER) || keys.contains(Key::BTN_SOUTH)
    });
    has_stick && has_buttons
}
