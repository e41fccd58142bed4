//! CLI command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use floating_calculator::position::{Point, Size};

/// floatcalc: drive the floating calculator widget from the command line
#[derive(Parser, Debug)]
#[command(name = "floatcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Widget configuration file (.json, otherwise YAML)
    #[arg(long, global = true, env = "FLOATCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay keypad tokens and print the display
    Keys(KeysArgs),

    /// Replay a drag gesture and print the final position
    Drag(DragArgs),

    /// Show the effective widget configuration
    Config(ConfigArgs),
}

/// Arguments for the keys command
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Keys in order: digits or numbers, + - x * / ÷ %, =, C, Backspace
    #[arg(required = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Print the calculator state after every token as JSON lines
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the drag command
#[derive(Args, Debug)]
pub struct DragArgs {
    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x800", value_parser = parse_size)]
    pub viewport: Size,

    /// Pointer-down position on the grab region as X,Y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub grab: Point,

    /// Pointer-move positions as X,Y (repeatable)
    #[arg(long = "to", value_parser = parse_point, allow_hyphen_values = true, required = true)]
    pub moves: Vec<Point>,

    /// Drag the minimized badge instead of the expanded card
    #[arg(long)]
    pub minimized: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: PositionFormat,
}

/// Output format of the drag command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionFormat {
    /// `X,Y`
    #[default]
    Text,
    /// Full placement state as JSON
    Json,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ConfigFormat,
}

/// Serialization format of the config command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Pretty JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

fn parse_pair(text: &str, separator: char, what: &str) -> Result<(f64, f64), String> {
    let (a, b) = text
        .split_once(separator)
        .ok_or_else(|| format!("expected {what}, got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{part}' is not a finite number"))
    };
    Ok((parse(a)?, parse(b)?))
}

/// Parses `WIDTHxHEIGHT`
pub fn parse_size(text: &str) -> Result<Size, String> {
    let (width, height) = parse_pair(text, 'x', "WIDTHxHEIGHT")?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("viewport '{text}' must not be negative"));
    }
    Ok(Size::new(width, height))
}

/// Parses `X,Y`
pub fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = parse_pair(text, ',', "X,Y")?;
    Ok(Point::new(x, y))
}
