//! Floating Calculator - a draggable pocket calculator widget
//!
//! A small calculator that floats over a page. It keeps a pocket-calculator
//! input model (left-to-right chaining, context-sensitive `%`), can be
//! dragged by its header or minimized badge, and always stays inside the
//! viewport.
//!
//! # Layers
//!
//! - [`core`]: arithmetic, number text format and the input state machine
//! - [`position`]: drag controller and viewport clamping
//! - [`keypad`]: button layout and keyboard mapping
//! - [`widget`]: the composed widget and its rendered element tree
//! - [`wasm`]: mock page for tests, and the browser binding (feature `wasm`)
//!
//! # Example
//!
//! ```rust
//! use floating_calculator::prelude::*;
//!
//! let mut widget = FloatingCalculator::new(|| {});
//! for key in ["5", "+", "3", "*", "2", "="] {
//!     widget.dispatch(WidgetEvent::Key(key.to_string()));
//! }
//! assert_eq!(widget.display(), "16");
//!
//! widget.dispatch(WidgetEvent::PointerDown {
//!     pointer: Point::new(40.0, 30.0),
//!     region: GrabRegion::Header,
//! });
//! widget.dispatch(WidgetEvent::PointerMove {
//!     pointer: Point::new(-500.0, 30.0),
//!     viewport: Size::new(1280.0, 800.0),
//! });
//! assert_eq!(widget.placement().position().x, 0.0);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod error;
pub mod keypad;
pub mod position;
pub mod widget;

/// Page hosting - the mock DOM is always available for testing
pub mod wasm;

pub use error::{WidgetError, WidgetResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{WidgetConfig, WidgetConfigBuilder};
    pub use crate::core::{
        apply, format_number, parse_number, CalculatorState, InputPhase, Operator,
    };
    pub use crate::error::{WidgetError, WidgetResult};
    pub use crate::keypad::{Keypad, KeypadAction};
    pub use crate::position::{
        clamp_to_viewport, DetachedTracker, GrabRegion, Point, PointerTracker,
        PositionController, PositionState, Presentation, Size,
    };
    pub use crate::wasm::{DomElement, DomEvent, MockDocument, MockDom};
    pub use crate::widget::{FloatingCalculator, WidgetEvent, WidgetSnapshot};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
}
