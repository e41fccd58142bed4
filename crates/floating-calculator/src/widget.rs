//! The floating calculator widget
//!
//! Composes the calculator state machine, the keypad and the position
//! controller behind a single event entry point, and renders the result as
//! a DOM element tree.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::WidgetConfig;
use crate::core::{format_number, CalculatorState};
use crate::keypad::{Keypad, KeypadAction};
use crate::position::{
    DetachedTracker, GrabRegion, Point, PointerTracker, PositionController, PositionState,
    Presentation, Size,
};
use crate::wasm::{DomElement, DomEvent};

/// Root element ID
pub const ROOT_ID: &str = "floating-calculator";
/// Header (grab region of the expanded card)
pub const HEADER_ID: &str = "calc-header";
/// Title text inside the header
pub const TITLE_ID: &str = "calc-title";
/// Badge (grab region of the minimized widget)
pub const BADGE_ID: &str = "calc-badge";
/// Display text
pub const DISPLAY_ID: &str = "calc-display";
/// Pending expression shown above the display
pub const EXPRESSION_ID: &str = "calc-expression";
/// Minimize button in the header
pub const MINIMIZE_ID: &str = "btn-minimize";
/// Close button in the header
pub const CLOSE_ID: &str = "btn-close";
/// Restore button on the badge
pub const RESTORE_ID: &str = "btn-restore";

/// Input delivered to the widget
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Click on a button, by element ID
    ButtonClick(String),
    /// Keyboard key (`KeyboardEvent.key`)
    Key(String),
    /// Pointer pressed over part of the widget
    PointerDown {
        /// Client coordinates
        pointer: Point,
        /// Part of the widget under the pointer
        region: GrabRegion,
    },
    /// Pointer moved anywhere in the document
    PointerMove {
        /// Client coordinates
        pointer: Point,
        /// Current viewport size
        viewport: Size,
    },
    /// Pointer released anywhere in the document
    PointerUp,
    /// Pointer left the document
    PointerLeave,
    /// Switch between expanded and minimized
    ToggleMinimized,
    /// Dismiss the widget
    Close,
}

impl WidgetEvent {
    /// Translates a page event, resolving the grab region from the target ID
    #[must_use]
    pub fn from_dom(event: &DomEvent, viewport: Size) -> Self {
        match event {
            DomEvent::Click { element_id } => Self::ButtonClick(element_id.clone()),
            DomEvent::KeyDown { key } => Self::Key(key.clone()),
            DomEvent::MouseDown { element_id, x, y } => Self::PointerDown {
                pointer: Point::new(*x, *y),
                region: region_of(element_id),
            },
            DomEvent::MouseMove { x, y } => Self::PointerMove {
                pointer: Point::new(*x, *y),
                viewport,
            },
            DomEvent::MouseUp => Self::PointerUp,
            DomEvent::MouseLeave => Self::PointerLeave,
        }
    }
}

/// Grab region an element belongs to
///
/// Buttons never start a drag, including those inside the header or badge.
#[must_use]
pub fn region_of(element_id: &str) -> GrabRegion {
    match element_id {
        HEADER_ID | TITLE_ID => GrabRegion::Header,
        BADGE_ID => GrabRegion::Badge,
        _ => GrabRegion::Body,
    }
}

/// Serializable view of the whole widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    /// Calculator state
    pub calculator: CalculatorState,
    /// Placement state
    pub placement: PositionState,
    /// Whether the widget has been closed
    pub closed: bool,
}

/// Floating calculator widget
pub struct FloatingCalculator<T: PointerTracker = DetachedTracker> {
    calculator: CalculatorState,
    placement: PositionController<T>,
    keypad: Keypad,
    on_close: Box<dyn FnMut()>,
    closed: bool,
}

impl FloatingCalculator<DetachedTracker> {
    /// Creates a widget with the default configuration
    #[must_use]
    pub fn new(on_close: impl FnMut() + 'static) -> Self {
        Self::with_tracker(&WidgetConfig::default(), DetachedTracker, on_close)
    }
}

impl<T: PointerTracker> FloatingCalculator<T> {
    /// Creates a widget placed per `config`, tracking drags through `tracker`
    #[must_use]
    pub fn with_tracker(
        config: &WidgetConfig,
        tracker: T,
        on_close: impl FnMut() + 'static,
    ) -> Self {
        Self {
            calculator: CalculatorState::new(),
            placement: PositionController::new(config, tracker),
            keypad: Keypad::new(),
            on_close: Box::new(on_close),
            closed: false,
        }
    }

    /// Calculator state
    #[must_use]
    pub fn calculator(&self) -> &CalculatorState {
        &self.calculator
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.calculator.display()
    }

    /// Position controller
    #[must_use]
    pub fn placement(&self) -> &PositionController<T> {
        &self.placement
    }

    /// Keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Whether the widget has been closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Serializable snapshot of the widget
    #[must_use]
    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            calculator: self.calculator.clone(),
            placement: self.placement.state(),
            closed: self.closed,
        }
    }

    /// Applies a keypad action to the calculator
    pub fn apply_action(&mut self, action: KeypadAction) {
        if self.closed {
            return;
        }
        trace!(?action, "keypad action");
        action.apply_to(&mut self.calculator);
    }

    /// Handles one event; returns whether it changed or could change state
    pub fn dispatch(&mut self, event: WidgetEvent) -> bool {
        if self.closed {
            trace!(?event, "event after close ignored");
            return false;
        }

        match event {
            WidgetEvent::ButtonClick(id) => self.click(&id),
            WidgetEvent::Key(key) => {
                if self.placement.is_minimized() {
                    return false;
                }
                match Keypad::key_to_action(&key) {
                    Some(action) => {
                        self.apply_action(action);
                        true
                    }
                    None => false,
                }
            }
            WidgetEvent::PointerDown { pointer, region } => {
                self.placement.begin_drag(pointer, region)
            }
            WidgetEvent::PointerMove { pointer, viewport } => {
                self.placement.drag_to(pointer, viewport).is_some()
            }
            WidgetEvent::PointerUp | WidgetEvent::PointerLeave => self.placement.end_drag(),
            WidgetEvent::ToggleMinimized => {
                self.placement.toggle_minimized();
                true
            }
            WidgetEvent::Close => {
                self.close();
                true
            }
        }
    }

    fn click(&mut self, id: &str) -> bool {
        match (id, self.placement.presentation()) {
            (MINIMIZE_ID, Presentation::Expanded) | (RESTORE_ID, Presentation::Minimized) => {
                self.placement.toggle_minimized();
                true
            }
            (CLOSE_ID, Presentation::Expanded) => {
                self.close();
                true
            }
            (_, Presentation::Expanded) => match self.keypad.handle_click(id) {
                Some(action) => {
                    self.apply_action(action);
                    true
                }
                None => false,
            },
            (_, Presentation::Minimized) => false,
        }
    }

    /// Dismisses the widget: ends any drag, then invokes the close callback once
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.placement.end_drag();
        self.closed = true;
        debug!("widget closed");
        (self.on_close)();
    }

    /// Renders the widget, or `None` once closed
    #[must_use]
    pub fn render(&self) -> Option<DomElement> {
        if self.closed {
            return None;
        }

        let position = self.placement.position();
        let footprint = self.placement.footprint();
        let mut root = DomElement::new("div")
            .with_id(ROOT_ID)
            .with_class("floating-calculator")
            .with_attr("tabindex", "0")
            .with_style("position", "fixed")
            .with_style("left", &format!("{}px", position.x))
            .with_style("top", &format!("{}px", position.y))
            .with_style("width", &format!("{}px", footprint.width))
            .with_style("z-index", "50");
        if self.placement.is_dragging() {
            root.add_class("dragging");
        }

        let root = match self.placement.presentation() {
            Presentation::Expanded => root
                .with_class("expanded")
                .with_child(self.render_header())
                .with_child(self.render_screen())
                .with_child(self.keypad.create_keypad_element()),
            Presentation::Minimized => root
                .with_class("minimized")
                .with_style("height", &format!("{}px", footprint.height))
                .with_child(
                    DomElement::new("div")
                        .with_id(BADGE_ID)
                        .with_class("calc-badge")
                        .with_attr("title", self.calculator.display())
                        .with_child(
                            DomElement::new("button")
                                .with_id(RESTORE_ID)
                                .with_text("+")
                                .with_attr("aria-label", "Restore calculator"),
                        ),
                ),
        };
        Some(root)
    }

    fn render_header(&self) -> DomElement {
        let mut header = DomElement::new("div")
            .with_id(HEADER_ID)
            .with_class("calc-header")
            .with_child(
                DomElement::new("span")
                    .with_id(TITLE_ID)
                    .with_text("Calculator"),
            )
            .with_child(
                DomElement::new("button")
                    .with_id(MINIMIZE_ID)
                    .with_text("−")
                    .with_attr("aria-label", "Minimize calculator"),
            )
            .with_child(
                DomElement::new("button")
                    .with_id(CLOSE_ID)
                    .with_text("×")
                    .with_attr("aria-label", "Close calculator"),
            );
        header.add_class(if self.placement.is_dragging() {
            "cursor-grabbing"
        } else {
            "cursor-grab"
        });
        header
    }

    fn render_screen(&self) -> DomElement {
        let expression = match (self.calculator.previous_value(), self.calculator.operation()) {
            (Some(previous), Some(op)) => format!("{} {}", format_number(previous), op.symbol()),
            _ => String::new(),
        };
        DomElement::new("div")
            .with_class("calc-screen")
            .with_child(
                DomElement::new("div")
                    .with_id(EXPRESSION_ID)
                    .with_class("calc-expression")
                    .with_text(&expression),
            )
            .with_child(
                DomElement::new("div")
                    .with_id(DISPLAY_ID)
                    .with_class("calc-display")
                    .with_text(self.calculator.display()),
            )
    }
}

impl<T: PointerTracker> std::fmt::Debug for FloatingCalculator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatingCalculator")
            .field("calculator", &self.calculator)
            .field("placement", &self.placement)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
