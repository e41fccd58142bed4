//! Floating Calculator Demo - Mock Page
//!
//! Drives the widget through the mock DOM: keypad clicks, a header drag
//! that runs into the viewport edge, minimize, and close.
//!
//! Run with: cargo run --example mock_page_demo

use floating_calculator::prelude::*;
use floating_calculator::widget::{
    CLOSE_ID, DISPLAY_ID, HEADER_ID, MINIMIZE_ID, RESTORE_ID, ROOT_ID,
};

fn position(dom: &MockDom) -> String {
    dom.get_element(ROOT_ID).map_or_else(
        || "(unmounted)".to_string(),
        |root| {
            format!(
                "left={} top={}",
                root.get_style("left").unwrap_or("?"),
                root.get_style("top").unwrap_or("?")
            )
        },
    )
}

fn main() {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           Floating Calculator - Mock Page Demo               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut dom = MockDom::new(Size::new(1024.0, 768.0));
    let doc = dom.document();
    let mut widget =
        FloatingCalculator::with_tracker(&WidgetConfig::default(), doc.clone(), || {
            println!("   (close callback invoked)");
        });
    dom.mount(&widget);
    dom.focus(ROOT_ID);

    println!("1️⃣  Keypad: 5 + 3 × 2 =");
    for id in ["btn-5", "btn-plus", "btn-3", "btn-times", "btn-2", "btn-equals"] {
        dom.dispatch_event(&mut widget, DomEvent::click(id));
    }
    println!("   Display: {:?}", dom.get_element_text(DISPLAY_ID));

    println!("\n2️⃣  Keyboard: C 200 + 10 %");
    for key in ["C", "2", "0", "0", "+", "1", "0", "%"] {
        dom.dispatch_event(&mut widget, DomEvent::key_down(key));
    }
    println!("   Display: {:?}", dom.get_element_text(DISPLAY_ID));

    println!("\n3️⃣  Drag the header towards the bottom-right corner");
    println!("   Start: {}", position(&dom));
    dom.dispatch_event(&mut widget, DomEvent::mouse_down(HEADER_ID, 60.0, 40.0));
    println!(
        "   Document listeners: {}  body user-select: {:?}",
        doc.listener_count(),
        doc.body_user_select()
    );
    for step in 1..=4 {
        let offset = f64::from(step) * 300.0;
        dom.dispatch_event(&mut widget, DomEvent::mouse_move(60.0 + offset, 40.0 + offset));
        println!("   Move {step}: {}", position(&dom));
    }
    dom.dispatch_event(&mut widget, DomEvent::MouseUp);
    println!("   Released, document listeners: {}", doc.listener_count());

    println!("\n4️⃣  Minimize keeps the corner in place");
    dom.dispatch_event(&mut widget, DomEvent::click(MINIMIZE_ID));
    println!(
        "   Minimized: {}  {}",
        widget.placement().is_minimized(),
        position(&dom)
    );

    println!("\n5️⃣  Restore, then close");
    dom.dispatch_event(&mut widget, DomEvent::click(RESTORE_ID));
    dom.dispatch_event(&mut widget, DomEvent::click(CLOSE_ID));
    println!("   Closed: {}  {}", widget.is_closed(), position(&dom));

    println!("\n📜 {} page events dispatched", dom.event_history().len());
}
