//! Browser binding for the widget
//!
//! Mounts the rendered element tree into a container element and feeds DOM
//! events back into the widget. Drag tracking attaches move and release
//! listeners to the document element for the duration of one drag.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::config::WidgetConfig;
use crate::position::{Point, PointerTracker, Size};
use crate::wasm::DomElement;
use crate::widget::{region_of, FloatingCalculator, WidgetEvent, ROOT_ID};

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

/// Document-level drag listeners, created once per widget
#[derive(Debug)]
struct DragListeners {
    on_move: MouseListener,
    on_up: MouseListener,
    on_leave: MouseListener,
}

impl DragListeners {
    fn new(shared: &Weak<Shared>) -> Self {
        let weak = shared.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            forward(&weak, WidgetEvent::PointerMove {
                pointer,
                viewport: viewport_size(),
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        let weak = shared.clone();
        let on_up = Closure::wrap(Box::new(move |_: MouseEvent| {
            forward(&weak, WidgetEvent::PointerUp);
        }) as Box<dyn FnMut(MouseEvent)>);

        let weak = shared.clone();
        let on_leave = Closure::wrap(Box::new(move |_: MouseEvent| {
            forward(&weak, WidgetEvent::PointerLeave);
        }) as Box<dyn FnMut(MouseEvent)>);

        Self {
            on_move,
            on_up,
            on_leave,
        }
    }

    fn each(&self) -> [(&'static str, &js_sys::Function); 3] {
        [
            ("mousemove", self.on_move.as_ref().unchecked_ref()),
            ("mouseup", self.on_up.as_ref().unchecked_ref()),
            ("mouseleave", self.on_leave.as_ref().unchecked_ref()),
        ]
    }
}

/// Pointer tracker backed by the page's document element
#[derive(Debug)]
pub struct DocumentTracker {
    document: Document,
    listeners: Rc<DragListeners>,
}

impl PointerTracker for DocumentTracker {
    type Subscription = DocumentSubscription;

    fn subscribe(&mut self) -> Self::Subscription {
        if let Some(surface) = self.document.document_element() {
            for (event_type, callback) in self.listeners.each() {
                if let Err(err) = surface.add_event_listener_with_callback(event_type, callback) {
                    console::error_1(&err);
                }
            }
        }
        set_body_user_select(&self.document, Some("none"));
        DocumentSubscription {
            document: self.document.clone(),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

/// Attached drag listeners; dropping detaches them and restores text selection
#[derive(Debug)]
pub struct DocumentSubscription {
    document: Document,
    listeners: Rc<DragListeners>,
}

impl Drop for DocumentSubscription {
    fn drop(&mut self) {
        if let Some(surface) = self.document.document_element() {
            for (event_type, callback) in self.listeners.each() {
                if let Err(err) = surface.remove_event_listener_with_callback(event_type, callback)
                {
                    console::error_1(&err);
                }
            }
        }
        set_body_user_select(&self.document, None);
    }
}

fn set_body_user_select(document: &Document, value: Option<&str>) {
    let Some(body) = document.body() else {
        return;
    };
    let style = body.style();
    let result = match value {
        Some(value) => style.set_property("user-select", value),
        None => style.remove_property("user-select").map(drop),
    };
    if let Err(err) = result {
        console::error_1(&err);
    }
}

fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::default();
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}

fn target_id(event: &web_sys::Event) -> String {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| element.id())
        .unwrap_or_default()
}

fn forward(shared: &Weak<Shared>, event: WidgetEvent) {
    if let Some(shared) = shared.upgrade() {
        shared.dispatch(event);
    }
}

/// Widget-level listeners on the container
#[derive(Debug)]
struct ContainerListeners {
    on_click: MouseListener,
    on_mouse_down: MouseListener,
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
}

impl ContainerListeners {
    fn new(shared: &Weak<Shared>) -> Self {
        let weak = shared.clone();
        let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
            forward(&weak, WidgetEvent::ButtonClick(target_id(&event)));
        }) as Box<dyn FnMut(MouseEvent)>);

        let weak = shared.clone();
        let on_mouse_down = Closure::wrap(Box::new(move |event: MouseEvent| {
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            forward(&weak, WidgetEvent::PointerDown {
                pointer,
                region: region_of(&target_id(&event)),
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        let weak = shared.clone();
        let on_key_down = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            forward(&weak, WidgetEvent::Key(event.key()));
        }) as Box<dyn FnMut(KeyboardEvent)>);

        Self {
            on_click,
            on_mouse_down,
            on_key_down,
        }
    }

    fn each(&self) -> [(&'static str, &js_sys::Function); 3] {
        [
            ("click", self.on_click.as_ref().unchecked_ref()),
            ("mousedown", self.on_mouse_down.as_ref().unchecked_ref()),
            ("keydown", self.on_key_down.as_ref().unchecked_ref()),
        ]
    }
}

#[derive(Debug)]
struct Shared {
    document: Document,
    container: Element,
    widget: RefCell<FloatingCalculator<DocumentTracker>>,
    listeners: ContainerListeners,
}

impl Shared {
    fn dispatch(&self, event: WidgetEvent) {
        let is_move = matches!(event, WidgetEvent::PointerMove { .. });
        let handled = match self.widget.try_borrow_mut() {
            Ok(mut widget) => widget.dispatch(event),
            Err(_) => {
                console::warn_1(&"calculator busy, event dropped".into());
                return;
            }
        };
        if !handled {
            return;
        }
        let result = if is_move {
            self.move_root()
        } else {
            self.render()
        };
        if let Err(err) = result {
            console::error_1(&err);
        }
    }

    /// Rebuilds the widget's markup; focus inside the old tree moves to the new one
    fn render(&self) -> Result<(), JsValue> {
        let widget = self.widget.try_borrow().map_err(|_| JsValue::from_str("calculator busy"))?;
        let focused = self
            .document
            .active_element()
            .filter(|active| {
                let node: &Node = active;
                self.container.contains(Some(node))
            })
            .map(|active| active.id());
        self.container.set_inner_html("");
        let Some(tree) = widget.render() else {
            return Ok(());
        };
        let element = build_element(&self.document, &tree)?;
        self.container.append_child(&element)?;
        if let Some(previous) = focused {
            let target = tree.refocus_target(&previous);
            if let Some(target) = self.document.get_element_by_id(target) {
                target.dyn_into::<HtmlElement>()?.focus()?;
            }
        }
        Ok(())
    }

    fn move_root(&self) -> Result<(), JsValue> {
        let widget = self.widget.try_borrow().map_err(|_| JsValue::from_str("calculator busy"))?;
        let position = widget.placement().position();
        if let Some(root) = self.document.get_element_by_id(ROOT_ID) {
            let root: HtmlElement = root.dyn_into()?;
            root.style().set_property("left", &format!("{}px", position.x))?;
            root.style().set_property("top", &format!("{}px", position.y))?;
        }
        Ok(())
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        for (event_type, callback) in self.listeners.each() {
            if let Err(err) = self
                .container
                .remove_event_listener_with_callback(event_type, callback)
            {
                console::error_1(&err);
            }
        }
        self.container.set_inner_html("");
    }
}

fn build_element(document: &Document, node: &DomElement) -> Result<Element, JsValue> {
    let element = document.create_element(&node.tag)?;
    if !node.id.is_empty() {
        element.set_id(&node.id);
    }
    if !node.classes.is_empty() {
        element.set_class_name(&node.class_name());
    }
    for (key, value) in &node.attributes {
        element.set_attribute(key, value)?;
    }
    if !node.style.is_empty() {
        element.set_attribute("style", &node.css_text())?;
    }
    if !node.text_content.is_empty() {
        element.set_text_content(Some(&node.text_content));
    }
    for child in &node.children {
        let child = build_element(document, child)?;
        element.append_child(&child)?;
    }
    Ok(element)
}

/// Floating calculator mounted into a page element
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Mounts a calculator with the default configuration
    ///
    /// `on_close` is called with no arguments when the user dismisses it.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        on_close: js_sys::Function,
    ) -> Result<BrowserCalculator, JsValue> {
        Self::mount(container_id, &WidgetConfig::default(), on_close)
    }

    /// Mounts a calculator configured from a JSON document
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        container_id: &str,
        config_json: &str,
        on_close: js_sys::Function,
    ) -> Result<BrowserCalculator, JsValue> {
        let config = WidgetConfig::from_json_str(config_json)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Self::mount(container_id, &config, on_close)
    }

    fn mount(
        container_id: &str,
        config: &WidgetConfig,
        on_close: js_sys::Function,
    ) -> Result<BrowserCalculator, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{container_id}'")))?;

        let close_callback = move || {
            if let Err(err) = on_close.call0(&JsValue::NULL) {
                console::error_1(&err);
            }
        };

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let tracker = DocumentTracker {
                document: document.clone(),
                listeners: Rc::new(DragListeners::new(weak)),
            };
            Shared {
                document: document.clone(),
                container: container.clone(),
                widget: RefCell::new(FloatingCalculator::with_tracker(
                    config,
                    tracker,
                    close_callback,
                )),
                listeners: ContainerListeners::new(weak),
            }
        });

        for (event_type, callback) in shared.listeners.each() {
            container.add_event_listener_with_callback(event_type, callback)?;
        }
        shared.render()?;
        Ok(Self { shared })
    }

    /// Current display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.shared
            .widget
            .try_borrow()
            .map(|widget| widget.display().to_string())
            .unwrap_or_default()
    }

    /// Left edge in CSS pixels
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.shared
            .widget
            .try_borrow()
            .map(|widget| widget.placement().position().x)
            .unwrap_or_default()
    }

    /// Top edge in CSS pixels
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.shared
            .widget
            .try_borrow()
            .map(|widget| widget.placement().position().y)
            .unwrap_or_default()
    }

    /// Whether the badge is shown
    #[wasm_bindgen(getter)]
    pub fn minimized(&self) -> bool {
        self.shared
            .widget
            .try_borrow()
            .is_ok_and(|widget| widget.placement().is_minimized())
    }

    /// Whether the widget has been dismissed
    #[wasm_bindgen(getter)]
    pub fn closed(&self) -> bool {
        self.shared
            .widget
            .try_borrow()
            .is_ok_and(|widget| widget.is_closed())
    }

    /// Feeds a key as if typed
    #[wasm_bindgen(js_name = pressKey)]
    pub fn press_key(&self, key: &str) {
        self.shared.dispatch(WidgetEvent::Key(key.to_string()));
    }

    /// Switches between expanded and minimized
    #[wasm_bindgen(js_name = toggleMinimized)]
    pub fn toggle_minimized(&self) {
        self.shared.dispatch(WidgetEvent::ToggleMinimized);
    }

    /// Dismisses the widget
    pub fn close(&self) {
        self.shared.dispatch(WidgetEvent::Close);
    }
}

/// Installs the panic hook when the module loads
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
