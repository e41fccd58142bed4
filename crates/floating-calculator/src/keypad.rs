//! Calculator keypad
//!
//! Button layout, element IDs and keyboard mapping. Buttons and keys both
//! resolve to a [`KeypadAction`], which the widget applies to its
//! [`CalculatorState`](crate::core::CalculatorState).

use crate::core::{CalculatorState, Operator};
use crate::error::{WidgetError, WidgetResult};
use crate::wasm::DomElement;

/// What a keypad button or key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter a decimal point
    Decimal,
    /// Choose an operator
    Operator(Operator),
    /// Context-sensitive percentage
    Percent,
    /// Evaluate the pending operation
    Equals,
    /// Reset the calculator
    Clear,
    /// Remove the last display character
    Backspace,
}

impl KeypadAction {
    /// Button label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Percent => "%".to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// Element ID of the button performing this action
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Decimal => "btn-decimal".to_string(),
            Self::Operator(op) => format!("btn-{}", op.name()),
            Self::Percent => "btn-percent".to_string(),
            Self::Equals => "btn-equals".to_string(),
            Self::Clear => "btn-clear".to_string(),
            Self::Backspace => "btn-backspace".to_string(),
        }
    }

    /// Applies the action to a calculator
    pub fn apply_to(self, calculator: &mut CalculatorState) {
        match self {
            Self::Digit(d) => calculator.input_digit(d),
            Self::Decimal => calculator.input_decimal(),
            Self::Operator(op) => calculator.input_operator(op),
            Self::Percent => calculator.input_percent(),
            Self::Equals => calculator.evaluate(),
            Self::Clear => calculator.clear(),
            Self::Backspace => calculator.backspace(),
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub col_span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self::spanning(action, row, col, 1)
    }

    /// Creates a button covering `col_span` columns
    #[must_use]
    pub fn spanning(action: KeypadAction, row: usize, col: usize, col_span: usize) -> Self {
        Self {
            id: action.element_id(),
            action,
            row,
            col,
            col_span,
        }
    }

    fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.col_span).contains(&col)
    }
}

/// Keypad layout
///
/// ```text
/// [ C ] [ ⌫ ] [ % ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [    0    ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Backspace, Clear, Decimal, Digit, Equals, Operator as Op, Percent};

        let buttons = vec![
            KeypadButtonDef::new(Clear, 0, 0),
            KeypadButtonDef::new(Backspace, 0, 1),
            KeypadButtonDef::new(Percent, 0, 2),
            KeypadButtonDef::new(Op(Operator::Divide), 0, 3),
            KeypadButtonDef::new(Digit(7), 1, 0),
            KeypadButtonDef::new(Digit(8), 1, 1),
            KeypadButtonDef::new(Digit(9), 1, 2),
            KeypadButtonDef::new(Op(Operator::Multiply), 1, 3),
            KeypadButtonDef::new(Digit(4), 2, 0),
            KeypadButtonDef::new(Digit(5), 2, 1),
            KeypadButtonDef::new(Digit(6), 2, 2),
            KeypadButtonDef::new(Op(Operator::Subtract), 2, 3),
            KeypadButtonDef::new(Digit(1), 3, 0),
            KeypadButtonDef::new(Digit(2), 3, 1),
            KeypadButtonDef::new(Digit(3), 3, 2),
            KeypadButtonDef::new(Op(Operator::Add), 3, 3),
            KeypadButtonDef::spanning(Digit(0), 4, 0, 2),
            KeypadButtonDef::new(Decimal, 4, 2),
            KeypadButtonDef::new(Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Processes a button click and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key (as reported by `KeyboardEvent.key`) to an action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        if let [b @ b'0'..=b'9'] = key.as_bytes() {
            return Some(KeypadAction::Digit(b - b'0'));
        }
        match key {
            "." | "," => Some(KeypadAction::Decimal),
            "%" => Some(KeypadAction::Percent),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "c" | "C" => Some(KeypadAction::Clear),
            "Backspace" | "⌫" => Some(KeypadAction::Backspace),
            other => Operator::from_symbol(other)
                .filter(|op| !matches!(op, Operator::Percent | Operator::Equals))
                .map(KeypadAction::Operator),
        }
    }

    /// Like [`Keypad::key_to_action`], failing on unknown keys
    pub fn parse_key(key: &str) -> WidgetResult<KeypadAction> {
        Self::key_to_action(key).ok_or_else(|| WidgetError::unknown_key(key))
    }

    /// Creates DOM elements for all keypad buttons
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                let mut elem = DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("keypad-btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col));
                if btn.col_span > 1 {
                    elem = elem.with_class(&format!("col-span-{}", btn.col_span));
                }
                elem
            })
            .collect()
    }

    /// Creates the keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        let mut keypad = DomElement::new("div")
            .with_id("calc-keypad")
            .with_class("keypad");

        for btn_elem in self.create_dom_elements() {
            keypad = keypad.with_child(btn_elem);
        }

        keypad
    }
}
