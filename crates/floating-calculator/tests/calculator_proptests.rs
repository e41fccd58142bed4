//! Property-based tests for the input state machine
//!
//! Digit entry, chaining, clear and backspace hold for arbitrary key
//! sequences, not just the hand-picked ones in the unit tests.

use floating_calculator::core::{apply, format_number, CalculatorState, Operator};
use floating_calculator::keypad::KeypadAction;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any valid digit (0-9)
fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

/// Generate a binary operator
fn binary_operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
    ]
}

/// Generate any keypad action
fn keypad_action_strategy() -> impl Strategy<Value = KeypadAction> {
    prop_oneof![
        4 => digit_strategy().prop_map(KeypadAction::Digit),
        1 => Just(KeypadAction::Decimal),
        2 => binary_operator_strategy().prop_map(KeypadAction::Operator),
        1 => Just(KeypadAction::Percent),
        1 => Just(KeypadAction::Equals),
        1 => Just(KeypadAction::Clear),
        1 => Just(KeypadAction::Backspace),
    ]
}

fn run(actions: &[KeypadAction]) -> CalculatorState {
    let mut calc = CalculatorState::new();
    for action in actions {
        action.apply_to(&mut calc);
    }
    calc
}

fn enter_number(calc: &mut CalculatorState, n: u32) {
    for ch in n.to_string().chars() {
        calc.input_digit(ch.to_digit(10).unwrap() as u8);
    }
}

// ===== Digit entry =====

proptest! {
    /// Digits from the initial state concatenate, collapsing leading zeros
    #[test]
    fn prop_digits_concatenate_with_zero_collapse(
        digits in prop::collection::vec(digit_strategy(), 1..15)
    ) {
        let mut calc = CalculatorState::new();
        for d in &digits {
            calc.input_digit(*d);
        }

        let typed: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
        let trimmed = typed.trim_start_matches('0');
        let expected = if trimmed.is_empty() { "0" } else { trimmed };
        prop_assert_eq!(calc.display(), expected);
    }

    /// Entering digits never leaves the Idle phase
    #[test]
    fn prop_digits_leave_nothing_pending(
        digits in prop::collection::vec(digit_strategy(), 0..10)
    ) {
        let mut calc = CalculatorState::new();
        for d in digits {
            calc.input_digit(d);
        }
        prop_assert_eq!(calc.previous_value(), None);
        prop_assert_eq!(calc.operation(), None);
    }
}

// ===== Chaining =====

proptest! {
    /// `a op1 b op2 c =` evaluates strictly left to right
    #[test]
    fn prop_chaining_is_left_to_right(
        a in 0u32..10_000,
        b in 0u32..10_000,
        c in 0u32..10_000,
        op1 in binary_operator_strategy(),
        op2 in binary_operator_strategy(),
    ) {
        let mut calc = CalculatorState::new();
        enter_number(&mut calc, a);
        calc.input_operator(op1);
        enter_number(&mut calc, b);
        calc.input_operator(op2);
        enter_number(&mut calc, c);
        calc.evaluate();

        let expected = apply(apply(f64::from(a), f64::from(b), op1), f64::from(c), op2);
        prop_assert_eq!(calc.display(), format_number(expected));
        prop_assert_eq!(calc.operation(), None);
        prop_assert!(calc.is_awaiting_new_operand());
    }

    /// Percent with a pending operator always ends the chain
    #[test]
    fn prop_percent_terminates_chain(
        a in 0u32..10_000,
        b in 0u32..100,
        op in binary_operator_strategy(),
    ) {
        let mut calc = CalculatorState::new();
        enter_number(&mut calc, a);
        calc.input_operator(op);
        enter_number(&mut calc, b);
        calc.input_percent();

        prop_assert_eq!(calc.previous_value(), None);
        prop_assert_eq!(calc.operation(), None);
        prop_assert!(calc.is_awaiting_new_operand());
    }
}

// ===== Clear and backspace =====

proptest! {
    /// Clear restores the initial state from anywhere, and again is a no-op
    #[test]
    fn prop_clear_is_idempotent(
        actions in prop::collection::vec(keypad_action_strategy(), 0..30)
    ) {
        let mut calc = run(&actions);
        calc.clear();
        prop_assert_eq!(&calc, &CalculatorState::new());
        calc.clear();
        prop_assert_eq!(&calc, &CalculatorState::new());
    }

    /// Backspace never empties the display and bottoms out at "0"
    #[test]
    fn prop_backspace_converges_to_zero(
        actions in prop::collection::vec(keypad_action_strategy(), 0..30)
    ) {
        let mut calc = run(&actions);
        let presses = calc.display().chars().count();
        for _ in 0..presses {
            calc.backspace();
            prop_assert!(!calc.display().is_empty());
        }
        prop_assert_eq!(calc.display(), "0");
        calc.backspace();
        prop_assert_eq!(calc.display(), "0");
    }

    /// Backspace leaves the pending operation alone
    #[test]
    fn prop_backspace_keeps_pending_operation(
        actions in prop::collection::vec(keypad_action_strategy(), 0..30)
    ) {
        let mut calc = run(&actions);
        let previous = calc.previous_value().map(f64::to_bits);
        let operation = calc.operation();
        calc.backspace();
        prop_assert_eq!(calc.previous_value().map(f64::to_bits), previous);
        prop_assert_eq!(calc.operation(), operation);
    }

    /// No key sequence ever produces an empty display
    #[test]
    fn prop_display_never_empty(
        actions in prop::collection::vec(keypad_action_strategy(), 0..50)
    ) {
        prop_assert!(!run(&actions).display().is_empty());
    }
}

// ===== Invariants =====

#[test]
fn invariant_mixed_chain_left_to_right() {
    let mut calc = CalculatorState::new();
    calc.input_digit(5);
    calc.input_operator(Operator::Add);
    calc.input_digit(3);
    calc.input_operator(Operator::Multiply);
    calc.input_digit(2);
    calc.evaluate();
    assert_eq!(calc.display(), "16");
}

#[test]
fn invariant_percent_of_anchor() {
    let mut calc = CalculatorState::new();
    enter_number(&mut calc, 200);
    calc.input_operator(Operator::Add);
    enter_number(&mut calc, 10);
    calc.input_percent();
    assert_eq!(calc.display(), "220");
}

#[test]
fn invariant_divide_by_zero_is_infinity() {
    let mut calc = CalculatorState::new();
    calc.input_digit(5);
    calc.input_operator(Operator::Divide);
    calc.input_digit(0);
    calc.evaluate();
    assert_eq!(calc.display(), "Infinity");
}
