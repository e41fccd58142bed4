//! Browser binding tests
//!
//! Run in a headless browser with
//! `wasm-pack test --headless --firefox crates/floating-calculator -- --features wasm`.

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use floating_calculator::wasm::BrowserCalculator;
use floating_calculator::widget::{DISPLAY_ID, MINIMIZE_ID, ROOT_ID};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(container_id: &str) -> BrowserCalculator {
    let doc = document();
    let container = doc.create_element("div").unwrap();
    container.set_id(container_id);
    doc.body().unwrap().append_child(&container).unwrap();
    BrowserCalculator::new(container_id, js_sys::Function::new_no_args("")).unwrap()
}

fn focus(id: &str) {
    document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .focus()
        .unwrap();
}

fn active_id() -> String {
    document().active_element().map(|e| e.id()).unwrap_or_default()
}

/// Fires a bubbling keydown at whatever currently has focus
fn type_key(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    let target = document().active_element().unwrap();
    target.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn test_mount_builds_nested_tree() {
    let calc = mount("host-tree");
    let doc = document();
    assert_eq!(doc.get_element_by_id(DISPLAY_ID).unwrap().text_content().unwrap(), "0");
    assert!(doc.get_element_by_id("btn-7").is_some());
    assert!(doc.get_element_by_id(MINIMIZE_ID).is_some());
    drop(calc);
    assert!(doc.get_element_by_id(ROOT_ID).is_none());
}

#[wasm_bindgen_test]
fn test_typing_keeps_focus_across_renders() {
    let calc = mount("host-keys");
    focus(ROOT_ID);
    for key in ["1", "2", "+", "3", "Enter"] {
        type_key(key);
        assert_eq!(active_id(), ROOT_ID);
    }
    assert_eq!(calc.display(), "15");
}

#[wasm_bindgen_test]
fn test_focused_button_survives_render() {
    let calc = mount("host-button");
    focus("btn-7");
    type_key("8");
    assert_eq!(active_id(), "btn-7");
    type_key("9");
    assert_eq!(calc.display(), "89");
}
