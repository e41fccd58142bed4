//! Calculator core: arithmetic engine, number text format, input state machine
//!
//! Everything here is pure and infallible. Invalid arithmetic is reported
//! the way a pocket calculator reports it, as `NaN` or `Infinity` on the
//! display.

pub mod input;
pub mod number;
mod operations;

pub use input::{CalculatorState, InputPhase, INITIAL_DISPLAY};
pub use number::{format_number, parse_number};
pub use operations::{apply, percent_in_context, Operator};
