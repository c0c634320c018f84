//! # Channel Expressions
//!
//! Builds [`Channel`]s from TOML values, so mixes can live in the config file.
//!
//! Every expression is an inline table with exactly one key:
//!
//! | Key | Value | Channel |
//! |-----|-------|---------|
//! | `axis` | index | joystick axis |
//! | `button` | index | 1.0 pressed / -1.0 released |
//! | `switch` | `{ hat, axis = "x"\|"y", steps, initial }` | hat-driven switch; `axis` defaults to `"x"`, `initial` to 0 |
//! | `neg` | expression | `-expr` |
//! | `unipolar` | expression | `0.5 + expr / 2` |
//! | `add` / `sub` / `mul` | `[expression, operand]` | binary mix |
//! | `calibrate` | `{ channel, deadzone, expo }` | deadzone + expo |
//!
//! An operand is a number or another expression.
//!
//! ```
//! use flystick::controller::frame::EventFrame;
//! use flystick::mixer::expr;
//!
//! // (-axis(0) + 0.1) * 0.5
//! let value: toml::Value = toml::from_str::<toml::Table>(
//!     "expr = { mul = [ { add = [ { neg = { axis = 0 } }, 0.1 ] }, 0.5 ] }",
//! )?["expr"].clone();
//!
//! let mut channel = expr::build(&value)?;
//! let frame = EventFrame::new(vec![0.5], vec![], vec![]);
//! assert!((channel.evaluate(&frame) - (-0.2)).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use toml::Value;

use super::calibration::Calibration;
use super::channel::{Channel, Operand};
use super::switch::Switch;
use crate::controller::frame::HatAxis;
use crate::controller::source::{ClickSource, Source};
use crate::error::{FlystickError, Result};

fn invalid(msg: impl Into<String>) -> FlystickError {
    FlystickError::InvalidExpression(msg.into())
}

/// Builds a channel from an expression value.
///
/// # Errors
///
/// - `InvalidOperand` when a binary operand is neither a number nor an expression
/// - `InvalidExpression` for unknown operators and malformed arguments
/// - `InvalidSteps` / `InvalidInitialStep` / `NotImplemented` / `MissingClickSource` from switches
pub fn build(value: &Value) -> Result<Channel> {
    let table = value
        .as_table()
        .ok_or_else(|| invalid(format!("expected a table, got {}", value.type_str())))?;

    let mut entries = table.iter();
    let (op, arg) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        (None, _) => return Err(invalid("empty expression")),
        (Some(_), Some(_)) => {
            let keys: Vec<&str> = table.keys().map(String::as_str).collect();
            return Err(invalid(format!(
                "expected exactly one operator, got {}",
                keys.join(", ")
            )));
        }
    };

    match op.as_str() {
        "axis" => Ok(Channel::from(Source::Axis(index(arg, "axis")?))),
        "button" => Ok(Channel::from(Source::Button(index(arg, "button")?))),
        "switch" => Ok(Channel::from(switch(arg)?)),
        "neg" => Ok(build(arg)?.negate()),
        "unipolar" => Ok(build(arg)?.rescale_unipolar()),
        "add" => {
            let (left, right) = binary(op, arg)?;
            Ok(left.add(right))
        }
        "sub" => {
            let (left, right) = binary(op, arg)?;
            Ok(left.subtract(right))
        }
        "mul" => {
            let (left, right) = binary(op, arg)?;
            Ok(left.multiply(right))
        }
        "calibrate" => calibrate(arg),
        other => Err(invalid(format!("unknown operator '{}'", other))),
    }
}

/// Resolves the right-hand side of a binary operator.
///
/// # Errors
///
/// Returns `InvalidOperand` for strings, booleans, arrays and datetimes.
pub fn operand(value: &Value) -> Result<Operand> {
    match value {
        Value::Float(f) => Ok(Operand::Constant(*f as f32)),
        Value::Integer(i) => Ok(Operand::Constant(*i as f32)),
        Value::Table(_) => Ok(Operand::Channel(build(value)?)),
        other => Err(FlystickError::InvalidOperand(other.type_str().to_string())),
    }
}

fn binary(op: &str, arg: &Value) -> Result<(Channel, Operand)> {
    match arg.as_array().map(Vec::as_slice) {
        Some([left, right]) => {
            if !left.is_table() {
                return Err(invalid(format!(
                    "left side of '{}' must be a channel, got {}",
                    op,
                    left.type_str()
                )));
            }
            Ok((build(left)?, operand(right)?))
        }
        _ => Err(invalid(format!("'{}' takes a [channel, operand] pair", op))),
    }
}

fn index(value: &Value, what: &str) -> Result<usize> {
    value
        .as_integer()
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| invalid(format!("{} index must be a non-negative integer", what)))
}

fn number(table: &toml::Table, key: &str, default: f32) -> Result<f32> {
    match table.get(key) {
        None => Ok(default),
        Some(Value::Float(f)) => Ok(*f as f32),
        Some(Value::Integer(i)) => Ok(*i as f32),
        Some(other) => Err(invalid(format!(
            "'{}' must be a number, got {}",
            key,
            other.type_str()
        ))),
    }
}

fn hat_axis(value: Option<&Value>) -> Result<HatAxis> {
    let Some(value) = value else {
        return Ok(HatAxis::X);
    };
    match value.as_str() {
        Some("x") => Ok(HatAxis::X),
        Some("y") => Ok(HatAxis::Y),
        _ => Err(invalid(format!("hat axis must be \"x\" or \"y\", got {}", value))),
    }
}

fn switch(arg: &Value) -> Result<Switch> {
    let table = arg
        .as_table()
        .ok_or_else(|| invalid("switch takes a table"))?;

    let hat = match table.get("hat") {
        Some(hat) => {
            let hat = index(hat, "hat")?;
            let hat = u8::try_from(hat).map_err(|_| invalid("hat index out of range"))?;
            Some((hat, hat_axis(table.get("axis"))?))
        }
        None => None,
    };
    let button = table
        .get("button")
        .map(|button| index(button, "button"))
        .transpose()?;
    let source = ClickSource::from_binding(hat, button)?;

    let steps = count(table.get("steps"), "steps")?
        .ok_or_else(|| invalid("switch requires 'steps'"))?;
    let initial = count(table.get("initial"), "initial")?.unwrap_or(0);

    Switch::new(source, steps, initial)
}

fn count(value: Option<&Value>, what: &str) -> Result<Option<u32>> {
    value
        .map(|v| {
            v.as_integer()
                .and_then(|i| u32::try_from(i).ok())
                .ok_or_else(|| invalid(format!("'{}' must be a non-negative integer", what)))
        })
        .transpose()
}

fn calibrate(arg: &Value) -> Result<Channel> {
    let table = arg
        .as_table()
        .ok_or_else(|| invalid("calibrate takes a table"))?;
    let channel = table
        .get("channel")
        .ok_or_else(|| invalid("calibrate requires 'channel'"))?;

    let calibration = Calibration::new(
        number(table, "deadzone", 0.0)?,
        number(table, "expo", 0.0)?,
    );
    Ok(build(channel)?.calibrate(calibration))
}
