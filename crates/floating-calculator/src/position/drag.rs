//! Drag controller: `AtRest` <-> `Dragging`

use tracing::{debug, trace};

use super::{GrabRegion, Point, PointerTracker, PositionState, Presentation, Size};
use crate::config::WidgetConfig;

/// Drag gesture state
///
/// The subscription lives inside `Dragging`, so the document listeners are
/// attached exactly as long as the gesture lasts.
pub enum DragState<S> {
    /// No gesture in progress
    AtRest,
    /// Pointer is down on the grab region
    Dragging {
        /// Pointer position minus the widget's top-left corner at grab time
        grab_offset: Point,
        /// Document-level listeners, detached on drop
        subscription: S,
    },
}

impl<S> DragState<S> {
    /// True while a gesture is in progress
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Grab offset of the active gesture
    #[must_use]
    pub fn grab_offset(&self) -> Option<Point> {
        match self {
            Self::AtRest => None,
            Self::Dragging { grab_offset, .. } => Some(*grab_offset),
        }
    }
}

impl<S> std::fmt::Debug for DragState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtRest => f.write_str("AtRest"),
            Self::Dragging { grab_offset, .. } => f
                .debug_struct("Dragging")
                .field("grab_offset", grab_offset)
                .finish_non_exhaustive(),
        }
    }
}

/// Clamps a candidate top-left corner so `footprint` fits in `viewport`
///
/// Each axis is limited to `[0, viewport - footprint]`. When the footprint
/// is larger than the viewport the axis pins to 0.
#[must_use]
pub fn clamp_to_viewport(candidate: Point, footprint: Size, viewport: Size) -> Point {
    let max_x = viewport.width - footprint.width;
    let max_y = viewport.height - footprint.height;
    // max(0, min(v, limit)); limit is negative when the viewport is too small
    Point::new(
        0.0_f64.max(candidate.x.min(max_x)),
        0.0_f64.max(candidate.y.min(max_y)),
    )
}

/// Owns the widget's position, presentation and drag gesture
pub struct PositionController<T: PointerTracker> {
    position: Point,
    minimized: bool,
    expanded_footprint: Size,
    minimized_footprint: Size,
    drag: DragState<T::Subscription>,
    tracker: T,
}

impl<T: PointerTracker> PositionController<T> {
    /// Creates a controller at the configured initial position, expanded
    #[must_use]
    pub fn new(config: &WidgetConfig, tracker: T) -> Self {
        Self {
            position: config.initial_position,
            minimized: false,
            expanded_footprint: config.expanded,
            minimized_footprint: config.minimized,
            drag: DragState::AtRest,
            tracker,
        }
    }

    /// Top-left corner in CSS pixels
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// True when shown as the small badge
    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Current presentation
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        if self.minimized {
            Presentation::Minimized
        } else {
            Presentation::Expanded
        }
    }

    /// Footprint used for clamping in the current presentation
    #[must_use]
    pub fn footprint(&self) -> Size {
        if self.minimized {
            self.minimized_footprint
        } else {
            self.expanded_footprint
        }
    }

    /// True while a drag gesture is in progress
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Drag state
    #[must_use]
    pub fn drag(&self) -> &DragState<T::Subscription> {
        &self.drag
    }

    /// Snapshot of the placement state
    #[must_use]
    pub fn state(&self) -> PositionState {
        PositionState {
            position: self.position,
            minimized: self.minimized,
            dragging: self.drag.is_dragging(),
            drag_grab_offset: self.drag.grab_offset(),
        }
    }

    /// The host's pointer tracker
    #[must_use]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Starts a drag if `region` is the grab region of the current presentation
    ///
    /// A second pointer-down during a drag re-captures the grab offset and
    /// keeps the existing subscription.
    pub fn begin_drag(&mut self, pointer: Point, region: GrabRegion) -> bool {
        if region != self.presentation().grab_region() {
            trace!(?region, "pointer down outside grab region");
            return false;
        }

        let grab_offset = pointer.offset_from(self.position);
        match &mut self.drag {
            DragState::Dragging {
                grab_offset: current,
                ..
            } => *current = grab_offset,
            DragState::AtRest => {
                let subscription = self.tracker.subscribe();
                self.drag = DragState::Dragging {
                    grab_offset,
                    subscription,
                };
            }
        }
        debug!(x = grab_offset.x, y = grab_offset.y, "drag started");
        true
    }

    /// Moves the widget under the pointer, clamped to `viewport`
    ///
    /// Returns the new position, or `None` when no drag is active.
    pub fn drag_to(&mut self, pointer: Point, viewport: Size) -> Option<Point> {
        let grab_offset = self.drag.grab_offset()?;
        let candidate = pointer.offset_from(grab_offset);
        self.position = clamp_to_viewport(candidate, self.footprint(), viewport);
        trace!(x = self.position.x, y = self.position.y, "dragged");
        Some(self.position)
    }

    /// Ends the active drag, detaching the document listeners
    ///
    /// This is the single teardown path for release, pointer leave and close.
    /// Returns false when no drag was active.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = self.drag.is_dragging();
        self.drag = DragState::AtRest;
        if was_dragging {
            debug!(x = self.position.x, y = self.position.y, "drag ended");
        }
        was_dragging
    }

    /// Flips between expanded and minimized without moving the widget
    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
        debug!(minimized = self.minimized, "presentation toggled");
    }
}

impl<T: PointerTracker> std::fmt::Debug for PositionController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionController")
            .field("position", &self.position)
            .field("minimized", &self.minimized)
            .field("expanded_footprint", &self.expanded_footprint)
            .field("minimized_footprint", &self.minimized_footprint)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::DetachedTracker;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Tracker counting live subscriptions
    #[derive(Debug, Default)]
    struct CountingTracker {
        live: Rc<Cell<usize>>,
        total: usize,
    }

    struct CountingSubscription(Rc<Cell<usize>>);

    impl Drop for CountingSubscription {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    impl PointerTracker for CountingTracker {
        type Subscription = CountingSubscription;

        fn subscribe(&mut self) -> Self::Subscription {
            self.total += 1;
            self.live.set(self.live.get() + 1);
            CountingSubscription(Rc::clone(&self.live))
        }
    }

    const VIEWPORT: Size = Size::new(1280.0, 800.0);

    fn controller() -> PositionController<DetachedTracker> {
        PositionController::new(&WidgetConfig::default(), DetachedTracker)
    }

    // ===== clamp_to_viewport =====

    #[test]
    fn test_clamp_inside_is_identity() {
        let p = clamp_to_viewport(Point::new(100.0, 50.0), Size::new(320.0, 400.0), VIEWPORT);
        assert_eq!(p, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_clamp_negative_to_zero() {
        let p = clamp_to_viewport(Point::new(-30.0, -1.0), Size::new(60.0, 60.0), VIEWPORT);
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_clamp_far_edge() {
        let p = clamp_to_viewport(Point::new(5000.0, 5000.0), Size::new(320.0, 400.0), VIEWPORT);
        assert_eq!(p, Point::new(960.0, 400.0));
    }

    #[test]
    fn test_clamp_viewport_smaller_than_footprint_pins_to_zero() {
        let p = clamp_to_viewport(
            Point::new(50.0, 50.0),
            Size::new(320.0, 400.0),
            Size::new(200.0, 300.0),
        );
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    // ===== Controller =====

    #[test]
    fn test_initial_state() {
        let ctl = controller();
        let state = ctl.state();
        assert_eq!(state.position, Point::new(24.0, 24.0));
        assert!(!state.minimized);
        assert!(!state.dragging);
        assert_eq!(state.drag_grab_offset, None);
        assert_eq!(ctl.footprint(), Size::new(320.0, 400.0));
    }

    #[test]
    fn test_grab_captures_offset_without_jump() {
        let mut ctl = controller();
        assert!(ctl.begin_drag(Point::new(54.0, 34.0), GrabRegion::Header));
        assert_eq!(ctl.drag().grab_offset(), Some(Point::new(30.0, 10.0)));
        let moved = ctl.drag_to(Point::new(54.0, 34.0), VIEWPORT);
        assert_eq!(moved, Some(Point::new(24.0, 24.0)));
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut ctl = controller();
        ctl.begin_drag(Point::new(54.0, 34.0), GrabRegion::Header);
        ctl.drag_to(Point::new(254.0, 134.0), VIEWPORT);
        assert_eq!(ctl.position(), Point::new(224.0, 124.0));
    }

    #[test]
    fn test_body_does_not_start_drag() {
        let mut ctl = controller();
        assert!(!ctl.begin_drag(Point::new(60.0, 200.0), GrabRegion::Body));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.drag_to(Point::new(500.0, 500.0), VIEWPORT), None);
        assert_eq!(ctl.position(), Point::new(24.0, 24.0));
    }

    #[test]
    fn test_badge_is_grab_region_only_when_minimized() {
        let mut ctl = controller();
        assert!(!ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Badge));
        ctl.toggle_minimized();
        assert!(!ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header));
        assert!(ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Badge));
    }

    #[test]
    fn test_release_ends_drag() {
        let mut ctl = controller();
        ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header);
        assert!(ctl.end_drag());
        assert!(!ctl.is_dragging());
        assert!(!ctl.end_drag());
        assert_eq!(ctl.drag_to(Point::new(400.0, 400.0), VIEWPORT), None);
    }

    #[test]
    fn test_toggle_minimized_does_not_move() {
        let mut ctl = controller();
        ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header);
        ctl.drag_to(Point::new(906.0, 406.0), VIEWPORT);
        ctl.end_drag();
        let before = ctl.position();
        ctl.toggle_minimized();
        assert_eq!(ctl.position(), before);
        assert_eq!(ctl.footprint(), Size::new(60.0, 60.0));
    }

    #[test]
    fn test_minimized_footprint_widens_clamp_bounds() {
        let mut ctl = controller();
        ctl.toggle_minimized();
        ctl.begin_drag(Point::new(24.0, 24.0), GrabRegion::Badge);
        ctl.drag_to(Point::new(5000.0, 5000.0), VIEWPORT);
        assert_eq!(ctl.position(), Point::new(1220.0, 740.0));
    }

    #[test]
    fn test_toggle_during_drag_changes_next_clamp() {
        let mut ctl = controller();
        ctl.begin_drag(Point::new(24.0, 24.0), GrabRegion::Header);
        ctl.drag_to(Point::new(5000.0, 5000.0), VIEWPORT);
        assert_eq!(ctl.position(), Point::new(960.0, 400.0));
        ctl.toggle_minimized();
        ctl.drag_to(Point::new(5000.0, 5000.0), VIEWPORT);
        assert_eq!(ctl.position(), Point::new(1220.0, 740.0));
    }

    // ===== Subscription lifetime =====

    #[test]
    fn test_subscription_lives_exactly_as_long_as_drag() {
        let tracker = CountingTracker::default();
        let live = Rc::clone(&tracker.live);
        let mut ctl = PositionController::new(&WidgetConfig::default(), tracker);

        assert_eq!(live.get(), 0);
        ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header);
        assert_eq!(live.get(), 1);
        ctl.drag_to(Point::new(100.0, 100.0), VIEWPORT);
        assert_eq!(live.get(), 1);
        ctl.end_drag();
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_regrab_keeps_single_subscription() {
        let tracker = CountingTracker::default();
        let live = Rc::clone(&tracker.live);
        let mut ctl = PositionController::new(&WidgetConfig::default(), tracker);

        ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header);
        ctl.begin_drag(Point::new(40.0, 30.0), GrabRegion::Header);
        assert_eq!(live.get(), 1);
        assert_eq!(ctl.tracker().total, 1);
        assert_eq!(ctl.drag().grab_offset(), Some(Point::new(16.0, 6.0)));
    }

    #[test]
    fn test_dropping_controller_mid_drag_detaches() {
        let tracker = CountingTracker::default();
        let live = Rc::clone(&tracker.live);
        let mut ctl = PositionController::new(&WidgetConfig::default(), tracker);
        ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header);
        drop(ctl);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_debug_omits_subscription() {
        let mut ctl = controller();
        ctl.begin_drag(Point::new(30.0, 30.0), GrabRegion::Header);
        let debug = format!("{ctl:?}");
        assert!(debug.contains("Dragging"));
        assert!(debug.contains("grab_offset"));
    }
}
