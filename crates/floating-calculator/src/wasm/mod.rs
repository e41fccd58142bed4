//! Page hosting for the widget
//!
//! The mock DOM is always compiled so the whole widget can be exercised in
//! native tests. The real browser binding needs the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, DocumentSubscription, DocumentTracker};
pub use dom::{
    DomElement, DomEvent, MockDocument, MockDom, MockListenerGuard, DRAG_LISTENER_EVENTS,
};
