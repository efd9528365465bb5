//! Owned store of every widget in an arrangement.

use std::collections::HashMap;
use kurbo::Rect;
use super::{LayoutWidget, LayoutWidgetKind, WidgetId};

/// Owns all widgets, keyed by id.
///
/// Collections reference widgets by [`WidgetId`] only, which keeps
/// ownership in one place and makes membership checks plain id comparisons.
#[derive(Debug, Clone, Default)]
pub struct WidgetArena {
    widgets: HashMap<WidgetId, LayoutWidget>,
}

impl WidgetArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new widget of the given kind and return its id.
    pub fn insert(&mut self, kind: LayoutWidgetKind) -> WidgetId {
        self.insert_widget(LayoutWidget::new(kind))
    }

    /// Store an already constructed widget.
    pub fn insert_widget(&mut self, widget: LayoutWidget) -> WidgetId {
        let id = widget.id;
        self.widgets.insert(id, widget);
        id
    }

    /// Get a widget by id.
    pub fn get(&self, id: WidgetId) -> Option<&LayoutWidget> {
        self.widgets.get(&id)
    }

    /// Get the kind of a widget.
    pub fn kind_of(&self, id: WidgetId) -> Option<LayoutWidgetKind> {
        self.widgets.get(&id).map(|w| w.kind)
    }

    /// Get the on-screen rect of a widget, if it has been laid out.
    pub fn rect_of(&self, id: WidgetId) -> Option<Rect> {
        self.widgets.get(&id).and_then(|w| w.rect)
    }

    /// Update the on-screen rect of a widget.
    /// Returns false if the widget does not exist.
    pub fn set_rect(&mut self, id: WidgetId, rect: Option<Rect>) -> bool {
        match self.widgets.get_mut(&id) {
            Some(widget) => {
                widget.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
