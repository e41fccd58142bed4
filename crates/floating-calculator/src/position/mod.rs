//! On-screen placement of the widget
//!
//! The widget floats at a top-left pixel offset and can be dragged by its
//! grab region. Every drag step is clamped so the widget's current
//! footprint stays inside the viewport.

mod drag;
mod tracker;

pub use drag::{clamp_to_viewport, DragState, PositionController};
pub use tracker::{DetachedTracker, PointerTracker};

use serde::{Deserialize, Serialize};

/// Point in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge
    pub x: f64,
    /// Vertical offset from the top edge
    pub y: f64,
}

impl Point {
    /// Creates a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`
    #[must_use]
    pub fn offset_from(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Width and height in CSS pixels, used for both footprints and viewports
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Creates a new size
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How the widget is currently presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Full calculator card
    Expanded,
    /// Small round badge
    Minimized,
}

impl Presentation {
    /// Region that starts a drag in this presentation
    #[must_use]
    pub const fn grab_region(self) -> GrabRegion {
        match self {
            Self::Expanded => GrabRegion::Header,
            Self::Minimized => GrabRegion::Badge,
        }
    }
}

/// Part of the widget a pointer went down on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrabRegion {
    /// Title bar of the expanded card
    Header,
    /// The minimized badge
    Badge,
    /// Display, keypad or any other non-draggable part
    Body,
}

/// Snapshot of the placement state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionState {
    /// Top-left corner
    pub position: Point,
    /// Whether the badge is shown instead of the card
    pub minimized: bool,
    /// Whether a drag is in progress
    pub dragging: bool,
    /// Pointer offset from the top-left corner, only while dragging
    pub drag_grab_offset: Option<Point>,
}
