//! # Flystick
//!
//! Fly RC models with a USB joystick.
//!
//! Reads the joystick through evdev, evaluates the configured channel mixes
//! once per frame and draws them onto the LED matrix frame buffer.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use flystick::config::Config;
use flystick::controller::joystick::Joystick;
use flystick::controller::mapper::EventMapper;
use flystick::display::FrameBuffer;
use flystick::model::Model;

/// Configuration file used when none is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for Flystick
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (first argument, or `config/default.toml`)
///    - Build the channel model
///    - Open the joystick and read its axis/button layout
///
/// 2. **Main Loop**
///    - Fold every joystick event into the current input state
///    - On each frame tick: take the frame, evaluate all channels, redraw
///    - Log channel values every `log_interval_frames` frames
///    - Handle Ctrl+C for graceful shutdown
///
/// # Errors
///
/// Returns error if:
/// - Configuration cannot be loaded or a channel expression is invalid
/// - No joystick is found, or it disconnects while running
///
/// # Examples
///
/// ```bash
/// RUST_LOG=flystick=debug cargo run --release -- config/default.toml
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Flystick v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = config_path(std::env::args().skip(1));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    info!("Loaded configuration from {}", config_path.display());

    let mut model = Model::from_config(&config.channels).context("Failed to build channels")?;
    info!(
        "Built {} channels: {}",
        model.len(),
        model.names().collect::<Vec<_>>().join(", ")
    );

    let joystick = Joystick::open_configured(&config.joystick.device_path)?;
    info!(
        "Joystick opened at {} ({})",
        joystick.device_path(),
        joystick.name().unwrap_or("unnamed")
    );

    let mut mapper = EventMapper::new(joystick.layout()?);
    let mut events = joystick.into_event_stream()?;

    let mut display = FrameBuffer::new(config.display.width);
    let mut frame_interval = interval(frame_period(config.frame.rate_hz));
    frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Starting control loop at {}Hz", config.frame.rate_hz);
    info!("Press Ctrl+C to exit");

    let mut frame_count: u64 = 0;

    // Main control loop
    loop {
        tokio::select! {
            // Fold joystick input into the pending frame
            event = events.next_event() => {
                let event = event.context("Joystick disconnected")?;
                mapper.process_event(&event);
            }

            // Evaluate and redraw at the frame rate
            _ = frame_interval.tick() => {
                let frame = mapper.take_frame();
                display.clear();
                let values = model.step(&frame, &mut display);
                frame_count += 1;

                if frame_count % config.frame.log_interval_frames == 0 {
                    debug!("Frame {}: {}", frame_count, format_values(model.names(), &values));
                    let frame_buffer = &display;
                    debug!("Display:\n{}", frame_buffer);
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total frames: {}", frame_count);
                break;
            }
        }
    }

    Ok(())
}

/// Configuration path from the command line arguments (program name excluded).
fn config_path<I: Iterator<Item = String>>(mut args: I) -> PathBuf {
    args.next()
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Tick period for a frame rate.
fn frame_period(rate_hz: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(rate_hz.max(1)))
}

/// `name=value` pairs for the periodic status line.
fn format_values<'a>(names: impl Iterator<Item = &'a str>, values: &[f32]) -> String {
    names
        .zip(values)
        .map(|(name, value)| format!("{}={:.2}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}
