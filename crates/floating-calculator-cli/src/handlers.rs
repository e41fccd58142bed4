//! Command handlers
//!
//! Each handler writes its result to the given writer so the commands can
//! be exercised without a terminal.

use std::io::Write;
use std::path::Path;

use floating_calculator::config::WidgetConfig;
use floating_calculator::keypad::{Keypad, KeypadAction};
use floating_calculator::position::DetachedTracker;
use floating_calculator::widget::{FloatingCalculator, WidgetEvent};
use floating_calculator::WidgetError;
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::{ConfigArgs, ConfigFormat, DragArgs, KeysArgs, PositionFormat};
use crate::error::{CliError, CliResult};

/// Loads the configuration file, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> CliResult<WidgetConfig> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading widget configuration");
            Ok(WidgetConfig::load(path)?)
        }
        None => Ok(WidgetConfig::default()),
    }
}

/// Expands a token into keypad actions
///
/// Single keys map directly. A run of digits and points such as `12.5` is
/// typed one character at a time.
pub fn token_actions(token: &str) -> CliResult<Vec<KeypadAction>> {
    if let Some(action) = Keypad::key_to_action(token) {
        return Ok(vec![action]);
    }
    let is_number = !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !is_number {
        return Err(WidgetError::unknown_key(token).into());
    }
    token
        .chars()
        .map(|c| Keypad::parse_key(c.encode_utf8(&mut [0; 4])).map_err(CliError::from))
        .collect()
}

fn new_widget(config: &WidgetConfig) -> FloatingCalculator {
    FloatingCalculator::with_tracker(config, DetachedTracker, || debug!("close requested"))
}

#[derive(Serialize)]
struct TraceLine<'a> {
    token: &'a str,
    display: &'a str,
    previous_value: Option<f64>,
    operation: Option<&'static str>,
    awaiting_new_operand: bool,
}

/// Replays keypad tokens and prints the final display
pub fn run_keys(config: &WidgetConfig, args: &KeysArgs, out: &mut impl Write) -> CliResult<()> {
    let tokens = args
        .tokens
        .iter()
        .map(|token| token_actions(token).map(|actions| (token.as_str(), actions)))
        .collect::<CliResult<Vec<_>>>()?;

    let mut widget = new_widget(config);
    for (token, actions) in tokens {
        for action in actions {
            widget.apply_action(action);
        }
        if args.trace {
            let calc = widget.calculator();
            let line = TraceLine {
                token,
                display: calc.display(),
                previous_value: calc.previous_value(),
                operation: calc.operation().map(|op| op.symbol()),
                awaiting_new_operand: calc.is_awaiting_new_operand(),
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
    }

    if !args.trace {
        writeln!(out, "{}", widget.display())?;
    }
    Ok(())
}

/// Replays a drag gesture and prints the final position
pub fn run_drag(config: &WidgetConfig, args: &DragArgs, out: &mut impl Write) -> CliResult<()> {
    let mut widget = new_widget(config);
    if args.minimized {
        widget.dispatch(WidgetEvent::ToggleMinimized);
    }

    let region = widget.placement().presentation().grab_region();
    if !widget.dispatch(WidgetEvent::PointerDown {
        pointer: args.grab,
        region,
    }) {
        return Err(CliError::drag("pointer-down did not start a drag"));
    }
    for pointer in &args.moves {
        widget.dispatch(WidgetEvent::PointerMove {
            pointer: *pointer,
            viewport: args.viewport,
        });
    }
    widget.dispatch(WidgetEvent::PointerUp);

    let state = widget.placement().state();
    info!(x = state.position.x, y = state.position.y, "drag replayed");
    match args.format {
        PositionFormat::Text => writeln!(out, "{},{}", state.position.x, state.position.y)?,
        PositionFormat::Json => writeln!(out, "{}", serde_json::to_string(&state)?)?,
    }
    Ok(())
}

/// Prints the effective configuration
pub fn run_config(config: &WidgetConfig, args: &ConfigArgs, out: &mut impl Write) -> CliResult<()> {
    let text = match args.format {
        ConfigFormat::Json => config.to_json()?,
        ConfigFormat::Yaml => config.to_yaml()?,
    };
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}
