//! Arithmetic engine
//!
//! Pocket-calculator semantics: every operation returns an `f64` and nothing
//! is rejected. Division by zero yields IEEE infinity or NaN, which the
//! display shows verbatim.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Pending operator of the input state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Percentage of product (%)
    Percent,
    /// Identity pass-through of the right operand (=)
    Equals,
}

impl Operator {
    /// All operators, in keypad order
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Percent,
        Self::Equals,
    ];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Percent => "%",
            Self::Equals => "=",
        }
    }

    /// Short ASCII name, used in element IDs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
            Self::Percent => "percent",
            Self::Equals => "equals",
        }
    }

    /// Parses an operator from its display symbol or a keyboard alias
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "×" | "*" | "x" | "X" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            "%" => Some(Self::Percent),
            "=" => Some(Self::Equals),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| WidgetError::UnknownOperator {
            symbol: s.to_string(),
        })
    }
}

/// Applies `op` to the operand pair
///
/// `%` yields `a * b / 100` and `=` passes `b` through. No value is special
/// cased, so `apply(5.0, 0.0, Operator::Divide)` is positive infinity.
#[must_use]
pub fn apply(a: f64, b: f64, op: Operator) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => a / b,
        Operator::Percent => (a * b) / 100.0,
        Operator::Equals => b,
    }
}

/// Context-sensitive percentage of a pending operation
///
/// `anchor` is the left operand already entered and `value` the percentage
/// typed after the operator: `200 + 10 %` is `220`, `200 × 10 %` is `20`.
/// Operators without a percent reading fall back to `value / 100`.
#[must_use]
pub fn percent_in_context(anchor: f64, value: f64, op: Operator) -> f64 {
    match op {
        Operator::Add => anchor + (anchor * value) / 100.0,
        Operator::Subtract => anchor - (anchor * value) / 100.0,
        Operator::Multiply => anchor * (value / 100.0),
        Operator::Divide => anchor / (value / 100.0),
        Operator::Percent | Operator::Equals => value / 100.0,
    }
}
