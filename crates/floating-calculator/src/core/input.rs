//! Input state machine
//!
//! Tracks what a pocket calculator tracks: the display buffer, the left
//! operand and operator waiting for a right operand, and whether the next
//! digit starts a fresh operand. Operators chain strictly left to right, so
//! `5 + 3 × 2 =` is `16`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::number::{format_number, parse_number};
use super::operations::{apply, percent_in_context, Operator};

/// Display text of a fresh calculator
pub const INITIAL_DISPLAY: &str = "0";

/// Coarse phase of the input state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPhase {
    /// No operator pending
    Idle,
    /// Operator chosen, waiting for (or reading) the right operand
    PendingOperator,
}

/// Calculator state for one widget session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    display: String,
    previous_value: Option<f64>,
    operation: Option<Operator>,
    awaiting_new_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a calculator showing `"0"` with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            previous_value: None,
            operation: None,
            awaiting_new_operand: false,
        }
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Display text read as a number
    #[must_use]
    pub fn display_value(&self) -> f64 {
        parse_number(&self.display)
    }

    /// Left operand of the pending operation
    #[must_use]
    pub fn previous_value(&self) -> Option<f64> {
        self.previous_value
    }

    /// Pending operator
    #[must_use]
    pub fn operation(&self) -> Option<Operator> {
        self.operation
    }

    /// True when the next digit replaces the display
    #[must_use]
    pub fn is_awaiting_new_operand(&self) -> bool {
        self.awaiting_new_operand
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> InputPhase {
        if self.operation.is_some() {
            InputPhase::PendingOperator
        } else {
            InputPhase::Idle
        }
    }

    /// Enters a digit `0..=9`
    ///
    /// Replaces the display when a new operand is awaited or when the display
    /// is the lone `"0"`, otherwise appends. Values above 9 are ignored.
    pub fn input_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            debug!(digit, "ignoring non-decimal digit");
            return;
        };

        if self.awaiting_new_operand {
            self.display = ch.to_string();
            self.awaiting_new_operand = false;
        } else if self.display == INITIAL_DISPLAY {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
        debug!(display = %self.display, "digit entered");
    }

    /// Enters a decimal point
    ///
    /// Starting a fresh operand, or typing over the lone `"0"`, yields `"0."`
    /// so the display keeps reading as a finite number.
    pub fn input_decimal(&mut self) {
        if self.awaiting_new_operand {
            self.display = "0.".to_string();
            self.awaiting_new_operand = false;
        } else {
            self.display.push('.');
        }
        debug!(display = %self.display, "decimal point entered");
    }

    /// Chooses the next operator, resolving any pending one first
    pub fn input_operator(&mut self, op: Operator) {
        let value = self.display_value();

        match (self.previous_value, self.operation) {
            (None, _) => self.previous_value = Some(value),
            (Some(anchor), Some(pending)) => {
                let result = apply(anchor, value, pending);
                self.display = format_number(result);
                self.previous_value = Some(result);
                debug!(%pending, anchor, value, result, "chained operation resolved");
            }
            // Anchor without an operator stays untouched.
            (Some(_), None) => {}
        }

        self.operation = Some(op);
        self.awaiting_new_operand = true;
        debug!(operator = %op, anchor = ?self.previous_value, "operator pending");
    }

    /// Applies the percent key
    ///
    /// With an operation pending the percentage is read against the anchor
    /// (`200 + 10 %` is `220`) and the chain ends. Otherwise the display is
    /// divided by 100.
    pub fn input_percent(&mut self) {
        let value = self.display_value();

        match (self.previous_value, self.operation) {
            (Some(anchor), Some(op)) => {
                let result = percent_in_context(anchor, value, op);
                self.display = format_number(result);
                self.previous_value = None;
                self.operation = None;
                debug!(%op, anchor, value, result, "percent committed pending operation");
            }
            _ => {
                self.display = format_number(value / 100.0);
                debug!(value, display = %self.display, "percent of display");
            }
        }
        self.awaiting_new_operand = true;
    }

    /// Evaluates the pending operation (`=`)
    ///
    /// Does nothing unless both an anchor and an operator are pending.
    pub fn evaluate(&mut self) {
        let (Some(anchor), Some(op)) = (self.previous_value, self.operation) else {
            debug!("evaluate with nothing pending");
            return;
        };

        let value = self.display_value();
        let result = apply(anchor, value, op);
        self.display = format_number(result);
        self.previous_value = None;
        self.operation = None;
        self.awaiting_new_operand = true;
        debug!(%op, anchor, value, result, "evaluated");
    }

    /// Resets to the initial state
    pub fn clear(&mut self) {
        *self = Self::new();
        debug!("cleared");
    }

    /// Removes the last display character, bottoming out at `"0"`
    pub fn backspace(&mut self) {
        let mut chars = self.display.chars();
        chars.next_back();
        let rest = chars.as_str();
        self.display = if rest.is_empty() {
            INITIAL_DISPLAY.to_string()
        } else {
            rest.to_string()
        };
        debug!(display = %self.display, "backspace");
    }
}
