//! Layout widgets: the draggable items of the interaction bar editor.
//!
//! Widgets are owned by a single [`WidgetArena`]. Collections only hold
//! [`WidgetId`]s, so moving a widget between collections never moves the
//! widget itself.

mod arena;
mod kind;

pub use arena::WidgetArena;
pub use kind::LayoutWidgetKind;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a widget in the arena.
pub type WidgetId = Uuid;

/// A single draggable widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutWidget {
    /// Unique identifier.
    pub id: WidgetId,
    /// What the widget displays.
    pub kind: LayoutWidgetKind,
    /// On-screen bounding box from the last layout pass.
    #[serde(skip)]
    pub rect: Option<Rect>,
}

impl LayoutWidget {
    /// Create a widget that has not been laid out yet.
    pub fn new(kind: LayoutWidgetKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            rect: None,
        }
    }

    /// Set the on-screen rect.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}
