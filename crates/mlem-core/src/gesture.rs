//! Drag gesture recognition for touch/mouse pointer events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Distance the pointer must travel before a drag gesture begins.
pub const DEFAULT_MINIMUM_DISTANCE: f64 = 10.0;

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// Snapshot of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Where the pointer went down.
    pub start_location: Point,
    /// Current pointer location.
    pub location: Point,
    /// Cumulative offset since the pointer went down.
    pub translation: Vec2,
}

impl DragGesture {
    /// Create a gesture from its start and current location.
    pub fn new(start_location: Point, location: Point) -> Self {
        Self {
            start_location,
            location,
            translation: location - start_location,
        }
    }
}

/// Drag events delivered to the arrangement engine, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The pointer moved while dragging.
    Changed(DragGesture),
    /// The pointer was lifted. Always terminates the drag.
    Ended(DragGesture),
}

/// Turns raw pointer events into drag events.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    minimum_distance: f64,
    /// Position of the last pointer down, while the pointer is held.
    start: Option<Point>,
    /// Whether the pointer has travelled far enough to count as a drag.
    active: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_DISTANCE)
    }
}

impl GestureRecognizer {
    /// Create a recognizer with the given activation distance.
    pub fn new(minimum_distance: f64) -> Self {
        Self {
            minimum_distance: minimum_distance.max(0.0),
            start: None,
            active: false,
        }
    }

    /// Whether a drag is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Process a pointer event, returning the drag event it produces.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<DragEvent> {
        match event {
            PointerEvent::Down { position } => {
                self.start = Some(position);
                self.active = false;
                None
            }
            PointerEvent::Move { position } => {
                let start = self.start?;
                let gesture = DragGesture::new(start, position);
                if !self.active && gesture.translation.hypot() < self.minimum_distance {
                    return None;
                }
                self.active = true;
                Some(DragEvent::Changed(gesture))
            }
            PointerEvent::Up { position } => {
                let start = self.start.take()?;
                let was_active = std::mem::replace(&mut self.active, false);
                was_active.then(|| DragEvent::Ended(DragGesture::new(start, position)))
            }
        }
    }
}
