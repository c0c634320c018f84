//! # Model Module
//!
//! The configured set of channels and how each one is drawn.
//!
//! Channels are evaluated once per frame in configuration order. Channels
//! with an `xy_dot` widget share one [`XyDot`] per column: each column must
//! be driven by exactly one horizontal and one vertical channel.

use serde::de::Error;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::{ChannelConfig, WidgetConfig, XyAxis};
use crate::controller::frame::EventFrame;
use crate::display::{Display, Primitive, Render, XyDot};
use crate::error::{FlystickError, Result};
use crate::mixer::{expr, Channel};

#[derive(Debug)]
enum Widget {
    Hidden,
    Single(Primitive),
    Horizontal(usize),
    Vertical(usize),
}

#[derive(Debug)]
struct Entry {
    name: String,
    channel: Channel,
    widget: Widget,
}

/// Evaluates and renders the configured channels.
///
/// # Examples
///
/// ```
/// use flystick::config::Config;
/// use flystick::controller::frame::EventFrame;
/// use flystick::display::FrameBuffer;
/// use flystick::model::Model;
///
/// let config = Config::parse(r#"
/// [[channels]]
/// name = "throttle"
/// expr = { axis = 2 }
/// display = { type = "y_bar", column = 10 }
/// "#)?;
/// let mut model = Model::from_config(&config.channels)?;
///
/// let mut fb = FrameBuffer::default();
/// let values = model.step(&EventFrame::new(vec![0.0, 0.0, 1.0], vec![], vec![]), &mut fb);
///
/// assert_eq!(values, vec![1.0]);
/// assert_eq!(fb.column(10), 0b11111);
/// # Ok::<(), flystick::error::FlystickError>(())
/// ```
#[derive(Debug)]
pub struct Model {
    entries: Vec<Entry>,
    pairs: Vec<XyDot>,
}

#[derive(Default)]
struct PairSlots {
    horizontal: Option<usize>,
    vertical: Option<usize>,
}

impl Model {
    /// Builds every channel expression and widget.
    ///
    /// # Errors
    ///
    /// - Expression errors from [`expr::build`]
    /// - `Config` if an `xy_dot` column does not have exactly one horizontal
    ///   and one vertical channel
    pub fn from_config(channels: &[ChannelConfig]) -> Result<Self> {
        let mut slots: BTreeMap<i32, PairSlots> = BTreeMap::new();
        for (index, channel) in channels.iter().enumerate() {
            if let Some(WidgetConfig::XyDot { column, axis }) = channel.display {
                let slot = slots.entry(column).or_default();
                let half = match axis {
                    XyAxis::Horizontal => &mut slot.horizontal,
                    XyAxis::Vertical => &mut slot.vertical,
                };
                if let Some(previous) = half.replace(index) {
                    return Err(FlystickError::Config(toml::de::Error::custom(format!(
                        "xy_dot column {} has two {:?} channels: '{}' and '{}'",
                        column, axis, channels[previous].name, channel.name
                    ))));
                }
            }
        }

        let mut pairs = Vec::with_capacity(slots.len());
        let mut pair_index = BTreeMap::new();
        for (column, slot) in &slots {
            if slot.horizontal.is_none() || slot.vertical.is_none() {
                return Err(FlystickError::Config(toml::de::Error::custom(format!(
                    "xy_dot column {} needs one horizontal and one vertical channel",
                    column
                ))));
            }
            pair_index.insert(*column, pairs.len());
            pairs.push(XyDot::new(*column));
        }

        let mut entries = Vec::with_capacity(channels.len());
        for config in channels {
            let channel = expr::build(&config.expr)?;
            let widget = match config.display {
                None => Widget::Hidden,
                Some(WidgetConfig::XyDot { column, axis }) => {
                    let pair = pair_index[&column];
                    match axis {
                        XyAxis::Horizontal => Widget::Horizontal(pair),
                        XyAxis::Vertical => Widget::Vertical(pair),
                    }
                }
                Some(widget) => widget.primitive().map_or(Widget::Hidden, Widget::Single),
            };
            debug!("Built channel '{}' ({:?})", config.name, widget);
            entries.push(Entry {
                name: config.name.clone(),
                channel,
                widget,
            });
        }

        Ok(Self { entries, pairs })
    }

    /// Evaluates every channel against `frame` and draws it.
    ///
    /// Returns the channel values in configuration order.
    pub fn step(&mut self, frame: &EventFrame, display: &mut dyn Display) -> Vec<f32> {
        let Self { entries, pairs } = self;
        entries
            .iter_mut()
            .map(|entry| {
                let value = entry.channel.evaluate(frame);
                match entry.widget {
                    Widget::Hidden => {}
                    Widget::Single(ref mut primitive) => primitive.render(value, display),
                    Widget::Horizontal(pair) => pairs[pair].horizontal(value, display),
                    Widget::Vertical(pair) => pairs[pair].vertical(value, display),
                }
                value
            })
            .collect()
    }

    /// Channel names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
