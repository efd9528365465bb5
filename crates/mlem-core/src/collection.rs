//! Drop zones holding an ordered sequence of widgets.

use crate::gesture::DragGesture;
use crate::widget::{LayoutWidget, LayoutWidgetKind, WidgetArena, WidgetId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a collection in the engine's priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub usize);

/// Placement rules for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRules {
    /// Maximum number of widgets, if capped.
    pub capacity: Option<usize>,
    /// Refuse a non-repeatable kind that is already present.
    pub unique_kinds: bool,
    /// Refuse kinds that cannot be removed from their collection.
    pub removable_only: bool,
}

impl DropRules {
    /// Accept anything.
    pub fn unrestricted() -> Self {
        Self {
            capacity: None,
            unique_kinds: false,
            removable_only: false,
        }
    }

    /// Rules for the interaction bar itself.
    pub fn bar(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            unique_kinds: true,
            removable_only: false,
        }
    }

    /// Rules for the tray of unused widgets.
    pub fn tray() -> Self {
        Self {
            capacity: None,
            unique_kinds: false,
            removable_only: true,
        }
    }
}

impl Default for DropRules {
    fn default() -> Self {
        Self::unrestricted()
    }
}

/// Why a collection refuses a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("widget kind is not accepted here")]
    NotAccepted,
    #[error("collection is full")]
    Full,
    #[error("widget kind is already present")]
    AlreadyPresent,
}

/// Where a widget returning to its own collection lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// The widget keeps its original index.
    #[default]
    PreserveIndex,
    /// The widget is re-appended to the tail, like any other drop.
    AppendToTail,
}

/// A slot in the previewed render order of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSlot {
    Widget(WidgetId),
    /// Gap where the dragged widget would land.
    Placeholder,
}

/// Uncommitted reflow shown while a drag is in progress.
#[derive(Debug, Clone, Default, PartialEq)]
struct ReflowPreview {
    /// Member widget lifted out of the layout by the drag.
    lifted: Option<WidgetId>,
    /// Index of the placeholder in the previewed order.
    placeholder: Option<usize>,
    /// Last pointer location seen while hovered.
    pointer: Option<Point>,
}

/// An ordered drop zone.
#[derive(Debug, Clone)]
pub struct WidgetCollection {
    name: String,
    items: Vec<WidgetId>,
    rect: Option<Rect>,
    rules: DropRules,
    preview: ReflowPreview,
}

impl WidgetCollection {
    /// Create an empty collection.
    pub fn new(name: impl Into<String>, rules: DropRules) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            rect: None,
            rules,
            preview: ReflowPreview::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Widgets in render order.
    pub fn items(&self) -> &[WidgetId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.items.contains(&id)
    }

    /// Index of a widget in this collection.
    pub fn position(&self, id: WidgetId) -> Option<usize> {
        self.items.iter().position(|&item| item == id)
    }

    /// On-screen rect from the last layout pass.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Option<Rect>) {
        self.rect = rect;
    }

    /// Check if the collection has been laid out and contains the point.
    pub fn rect_contains(&self, point: Point) -> bool {
        self.rect.is_some_and(|rect| rect.contains(point))
    }

    /// Find the member widget under a point.
    pub fn widget_at_location(&self, widgets: &WidgetArena, point: Point) -> Option<WidgetId> {
        if !self.rect_contains(point) {
            return None;
        }
        self.items
            .iter()
            .copied()
            .find(|&id| widgets.rect_of(id).is_some_and(|rect| rect.contains(point)))
    }

    /// Whether this collection can ever hold a widget of the given kind.
    pub fn can_accept(&self, kind: LayoutWidgetKind) -> bool {
        !self.rules.removable_only || kind.can_remove()
    }

    /// Check whether a widget may be dropped here.
    pub fn check_drop(&self, widgets: &WidgetArena, widget: &LayoutWidget) -> Result<(), Rejection> {
        if !self.can_accept(widget.kind) {
            return Err(Rejection::NotAccepted);
        }
        if self.contains(widget.id) {
            return Ok(());
        }
        if self.rules.capacity.is_some_and(|capacity| self.items.len() >= capacity) {
            return Err(Rejection::Full);
        }
        if self.rules.unique_kinds
            && !widget.kind.is_repeatable()
            && self.items.iter().any(|&id| widgets.kind_of(id) == Some(widget.kind))
        {
            return Err(Rejection::AlreadyPresent);
        }
        Ok(())
    }

    /// Whether dropping the candidate here is allowed. No candidate is always valid.
    pub fn is_valid_drop_location(&self, widgets: &WidgetArena, candidate: Option<&LayoutWidget>) -> bool {
        candidate.is_none_or(|widget| self.check_drop(widgets, widget).is_ok())
    }

    /// Refresh the reflow preview for the current drag tick.
    ///
    /// Only the preview changes; `items` is left untouched.
    pub fn update(
        &mut self,
        is_hovered: bool,
        gesture: &DragGesture,
        dragging: Option<WidgetId>,
        policy: ReturnPolicy,
    ) {
        let lifted = dragging.filter(|&id| self.contains(id));
        let placeholder = if is_hovered && dragging.is_some() {
            match (lifted.and_then(|id| self.position(id)), policy) {
                (Some(index), ReturnPolicy::PreserveIndex) => Some(index),
                (Some(_), ReturnPolicy::AppendToTail) => Some(self.items.len() - 1),
                (None, _) => Some(self.items.len()),
            }
        } else {
            None
        };

        self.preview = ReflowPreview {
            lifted,
            placeholder,
            pointer: is_hovered.then_some(gesture.location),
        };
    }

    /// Forget any in-progress preview.
    pub fn clear_preview(&mut self) {
        self.preview = ReflowPreview::default();
    }

    /// Whether the collection is currently showing a drop placeholder.
    pub fn is_preview_target(&self) -> bool {
        self.preview.placeholder.is_some()
    }

    /// Last pointer location seen while this collection was the drop target.
    pub fn preview_pointer(&self) -> Option<Point> {
        self.preview.pointer
    }

    /// Render order including the drag preview.
    pub fn preview_layout(&self) -> Vec<LayoutSlot> {
        let mut slots: Vec<LayoutSlot> = self
            .items
            .iter()
            .copied()
            .filter(|&id| Some(id) != self.preview.lifted)
            .map(LayoutSlot::Widget)
            .collect();
        if let Some(index) = self.preview.placeholder {
            let index = index.min(slots.len());
            slots.insert(index, LayoutSlot::Placeholder);
        }
        slots
    }

    /// Append a widget to the tail. The caller has already validated the drop.
    pub fn drop(&mut self, id: WidgetId) {
        self.items.push(id);
    }

    /// Remove a widget, returning the index it occupied.
    pub fn remove(&mut self, id: WidgetId) -> Option<usize> {
        let index = self.position(id)?;
        self.items.remove(index);
        Some(index)
    }
}
