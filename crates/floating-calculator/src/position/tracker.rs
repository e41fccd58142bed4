//! Process-wide pointer tracking for the duration of a drag
//!
//! A drag must keep receiving move and release events even when the pointer
//! leaves the widget, so the host attaches listeners to the whole document.
//! Those listeners exist only while a drag is active: the tracker hands out a
//! subscription value whose `Drop` removes them, and the drag controller
//! holds that value inside its `Dragging` state. Leaving that state on any
//! path (release, pointer leaving the window, closing the widget) drops it.

/// Host capability to track the pointer outside the widget
pub trait PointerTracker {
    /// Guard for the attached listeners; dropping it detaches them
    type Subscription;

    /// Attaches document-level move and release listeners
    fn subscribe(&mut self) -> Self::Subscription;
}

/// Tracker for hosts that already route every pointer event to the widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachedTracker;

impl PointerTracker for DetachedTracker {
    type Subscription = ();

    fn subscribe(&mut self) -> Self::Subscription {}
}
