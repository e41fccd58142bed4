//! Mock DOM for widget testing
//!
//! Stands in for the browser page: holds the rendered element tree, the
//! document-level listener registry and the body's `user-select` style, so
//! mounting, dragging and teardown can be verified without web-sys.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::position::{PointerTracker, Size};
use crate::widget::{FloatingCalculator, WidgetEvent};

/// Document events a drag listens for
pub const DRAG_LISTENER_EVENTS: [&str; 3] = ["mousemove", "mouseup", "mouseleave"];

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// Inline style properties, ordered by name
    pub style: BTreeMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            style: BTreeMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets an inline style property
    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Gets an inline style value
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Inline style serialized as a CSS declaration list
    #[must_use]
    pub fn css_text(&self) -> String {
        self.style
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Class list joined with spaces
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Depth-first search for a descendant (or self) by ID
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// Element that should hold focus after this tree replaces one where
    /// `previous` was focused: the same ID when it survived, else this root
    #[must_use]
    pub fn refocus_target(&self, previous: &str) -> &str {
        self.find_by_id(previous)
            .map_or(self.id.as_str(), |element| element.id.as_str())
    }
}

/// Events a test can fire at the mock page
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key pressed on the focused element
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
    },
    /// Mouse button pressed on an element
    MouseDown {
        /// The ID of the element under the pointer
        element_id: String,
        /// Client X
        x: f64,
        /// Client Y
        y: f64,
    },
    /// Mouse moved anywhere in the document
    MouseMove {
        /// Client X
        x: f64,
        /// Client Y
        y: f64,
    },
    /// Mouse button released anywhere in the document
    MouseUp,
    /// Pointer left the document
    MouseLeave,
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key-down event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }

    /// Creates a mouse-down event
    #[must_use]
    pub fn mouse_down(element_id: &str, x: f64, y: f64) -> Self {
        Self::MouseDown {
            element_id: element_id.to_string(),
            x,
            y,
        }
    }

    /// Creates a mouse-move event
    #[must_use]
    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self::MouseMove { x, y }
    }

    /// Document listener type this event is delivered through, if any
    #[must_use]
    pub fn document_listener(&self) -> Option<&'static str> {
        match self {
            Self::MouseMove { .. } => Some("mousemove"),
            Self::MouseUp => Some("mouseup"),
            Self::MouseLeave => Some("mouseleave"),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    listeners: Vec<&'static str>,
    body_user_select: Option<String>,
    subscriptions: usize,
}

/// Document-level listener registry shared with the widget's tracker
#[derive(Debug, Clone, Default)]
pub struct MockDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl MockDocument {
    /// Creates a document with no listeners
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached document listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Whether a listener for `event_type` is attached
    #[must_use]
    pub fn has_listener(&self, event_type: &str) -> bool {
        self.state.borrow().listeners.iter().any(|l| *l == event_type)
    }

    /// Body `user-select` override, if any
    #[must_use]
    pub fn body_user_select(&self) -> Option<String> {
        self.state.borrow().body_user_select.clone()
    }

    /// Total subscriptions handed out so far
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.state.borrow().subscriptions
    }
}

impl PointerTracker for MockDocument {
    type Subscription = MockListenerGuard;

    fn subscribe(&mut self) -> Self::Subscription {
        let mut state = self.state.borrow_mut();
        state.listeners.extend(DRAG_LISTENER_EVENTS);
        state.body_user_select = Some("none".to_string());
        state.subscriptions += 1;
        MockListenerGuard {
            state: Rc::clone(&self.state),
        }
    }
}

/// Attached drag listeners; dropping detaches them and restores the body style
#[derive(Debug)]
pub struct MockListenerGuard {
    state: Rc<RefCell<DocumentState>>,
}

impl Drop for MockListenerGuard {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        for event_type in DRAG_LISTENER_EVENTS {
            if let Some(idx) = state.listeners.iter().position(|l| *l == event_type) {
                state.listeners.remove(idx);
            }
        }
        state.body_user_select = None;
    }
}

/// Mock page hosting one widget
#[derive(Debug)]
pub struct MockDom {
    /// Rendered widget tree, `None` once the widget is closed
    pub root: Option<DomElement>,
    elements: HashMap<String, DomElement>,
    focused: Option<String>,
    document: MockDocument,
    viewport: Size,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty page with the given viewport
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            root: None,
            elements: HashMap::new(),
            focused: None,
            document: MockDocument::new(),
            viewport,
            event_history: Vec::new(),
        }
    }

    /// The page's document, to be handed to the widget as its tracker
    #[must_use]
    pub fn document(&self) -> MockDocument {
        self.document.clone()
    }

    /// Current viewport size
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Renders the widget into the page
    ///
    /// Focus inside the old tree carries over to the new one.
    pub fn mount<T: PointerTracker>(&mut self, widget: &FloatingCalculator<T>) {
        self.root = widget.render();
        self.elements.clear();
        self.focused = match (self.focused.take(), &self.root) {
            (Some(previous), Some(root)) => Some(root.refocus_target(&previous).to_string()),
            _ => None,
        };
        if let Some(root) = self.root.clone() {
            self.register_tree(root);
        }
    }

    /// Focuses an element on the page; returns whether it exists
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// ID of the focused element, if focus is inside the widget
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Pressing on a button focuses it; anything else focuses the root
    fn focus_pressed(&mut self, element_id: &str) {
        let target = match self.elements.get(element_id) {
            Some(element) if element.tag == "button" => Some(element_id.to_string()),
            _ => self.root.as_ref().map(|root| root.id.clone()),
        };
        self.focused = target;
    }

    fn register_tree(&mut self, element: DomElement) {
        for child in &element.children {
            self.register_tree(child.clone());
        }
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Delivers an event the way a browser would, then re-renders
    ///
    /// Element events need their target to be on the page and key presses
    /// need focus inside the widget. Document events only arrive while a
    /// drag listener for them is attached. Returns whether the widget
    /// handled the event.
    pub fn dispatch_event<T: PointerTracker>(
        &mut self,
        widget: &mut FloatingCalculator<T>,
        event: DomEvent,
    ) -> bool {
        self.event_history.push(event.clone());

        let delivered = match &event {
            DomEvent::Click { element_id } | DomEvent::MouseDown { element_id, .. } => {
                self.elements.contains_key(element_id)
            }
            DomEvent::KeyDown { .. } => self.focused.is_some(),
            other => other
                .document_listener()
                .is_some_and(|listener| self.document.has_listener(listener)),
        };
        if !delivered {
            return false;
        }
        if let DomEvent::Click { element_id } | DomEvent::MouseDown { element_id, .. } = &event {
            self.focus_pressed(element_id);
        }

        let handled = widget.dispatch(WidgetEvent::from_dom(&event, self.viewport));
        self.mount(widget);
        handled
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }
}
