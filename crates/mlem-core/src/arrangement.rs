//! Drag-and-drop arrangement of widgets between collections.
//!
//! The engine is a small state machine driven by drag events:
//!
//! - **Idle**: no widget is being dragged. A drag update over a widget picks
//!   it up, making its collection both the source and the predicted target.
//! - **Dragging**: every update re-runs hit testing, refreshes the predicted
//!   drop collection (sticky: an invalid hover keeps the last valid target),
//!   moves the floating widget and lets every collection preview its reflow.
//! - **Drop**: the widget moves from its source to the predicted collection
//!   in one step, and the engine returns to idle.

use crate::collection::{CollectionId, ReturnPolicy, WidgetCollection};
use crate::config::ArrangementConfig;
use crate::events::{ArrangementEvent, EventBus};
use crate::gesture::{DragEvent, DragGesture};
use crate::layout::{LayoutError, LayoutPreset, WidgetLayout};
use crate::widget::{LayoutWidget, WidgetArena, WidgetId};
use kurbo::{Point, Rect, Vec2};
use std::collections::HashSet;
use std::sync::mpsc::Receiver;

/// State of the current drag, read by the presentation layer every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    /// Widget being moved.
    pub dragging: Option<WidgetId>,
    /// Collection the widget was picked up from.
    pub source: Option<CollectionId>,
    /// Collection under the pointer.
    pub hovered: Option<CollectionId>,
    /// Collection that would receive the widget if dropped now.
    pub predicted: Option<CollectionId>,
    /// Position of the floating widget.
    pub offset: Vec2,
    /// Most recently placed widget.
    pub last_dropped: Option<WidgetId>,
    /// Origin of the dragged widget's rect when it was picked up.
    origin: Option<Point>,
}

/// A committed drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub widget: WidgetId,
    pub from: CollectionId,
    pub to: CollectionId,
    /// Index in the source collection before the drop.
    pub from_index: usize,
    /// Index in the target collection after the drop.
    pub to_index: usize,
}

impl DropOutcome {
    /// Whether the widget changed collection.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }

    /// Whether the arrangement differs from before the drop.
    pub fn changed(&self) -> bool {
        self.moved() || self.from_index != self.to_index
    }
}

/// Owns the widgets and collections of one editor screen and the drag
/// session acting on them.
#[derive(Debug)]
pub struct ArrangementEngine {
    widgets: WidgetArena,
    /// Collections in hit-test priority order.
    collections: Vec<WidgetCollection>,
    session: DragSession,
    return_policy: ReturnPolicy,
    events: EventBus,
}

impl ArrangementEngine {
    /// Create an engine over already populated collections.
    ///
    /// Collections are hit-tested in the order given; the first one containing
    /// the pointer wins.
    pub fn new(widgets: WidgetArena, collections: Vec<WidgetCollection>) -> Self {
        Self {
            widgets,
            collections,
            session: DragSession::default(),
            return_policy: ReturnPolicy::default(),
            events: EventBus::new(),
        }
    }

    /// Set where widgets dropped back into their own collection land.
    pub fn with_return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.return_policy = policy;
        self
    }

    /// Build an engine for a preset from a stored layout.
    ///
    /// Every placement is checked against the preset's palette and the
    /// collection's rules. A non-repeatable kind may appear only once across
    /// all collections, and widgets that cannot be removed must sit in the
    /// first collection.
    pub fn from_layout(
        preset: LayoutPreset,
        layout: &WidgetLayout,
        config: &ArrangementConfig,
    ) -> Result<Self, LayoutError> {
        let specs = preset.collection_specs(config.bar_capacity);
        let mut listed = HashSet::new();
        for stored in &layout.collections {
            if !specs.iter().any(|(name, _)| *name == stored.name) {
                return Err(LayoutError::UnknownCollection(stored.name.clone()));
            }
            if !listed.insert(stored.name.as_str()) {
                return Err(LayoutError::DuplicateCollection(stored.name.clone()));
            }
        }

        let mut widgets = WidgetArena::new();
        let mut seen = HashSet::new();
        let mut collections = Vec::with_capacity(specs.len());
        for (name, rules) in specs {
            let mut collection = WidgetCollection::new(name, rules);
            for &kind in layout.collection(name).unwrap_or_default() {
                if !preset.palette().contains(&kind) {
                    return Err(LayoutError::NotInPalette {
                        collection: name.to_string(),
                        kind,
                    });
                }
                if !kind.is_repeatable() && !seen.insert(kind) {
                    return Err(LayoutError::DuplicateKind(kind));
                }
                let widget = LayoutWidget::new(kind);
                collection
                    .check_drop(&widgets, &widget)
                    .map_err(|reason| LayoutError::Rejected {
                        collection: name.to_string(),
                        kind,
                        reason,
                    })?;
                collection.drop(widgets.insert_widget(widget));
            }
            collections.push(collection);
        }

        let (home, _) = specs[0];
        if let Some(&kind) = preset
            .palette()
            .iter()
            .find(|kind| !kind.can_remove() && !seen.contains(*kind))
        {
            return Err(LayoutError::MissingRequired {
                collection: home.to_string(),
                kind,
            });
        }

        log::info!(
            "Loaded layout {} with {} widgets",
            layout.id,
            widgets.len()
        );
        Ok(Self::new(widgets, collections).with_return_policy(config.return_policy))
    }

    /// Snapshot the arrangement for persistence.
    pub fn to_layout(&self, id: impl Into<String>) -> WidgetLayout {
        self.collections
            .iter()
            .fold(WidgetLayout::new(id), |layout, collection| {
                let kinds = collection
                    .items()
                    .iter()
                    .filter_map(|&id| self.widgets.kind_of(id))
                    .collect();
                layout.with_collection(collection.name(), kinds)
            })
    }

    pub fn widgets(&self) -> &WidgetArena {
        &self.widgets
    }

    pub fn collections(&self) -> &[WidgetCollection] {
        &self.collections
    }

    pub fn collection(&self, id: CollectionId) -> Option<&WidgetCollection> {
        self.collections.get(id.0)
    }

    /// Find a collection by name.
    pub fn collection_id(&self, name: &str) -> Option<CollectionId> {
        self.collections
            .iter()
            .position(|c| c.name() == name)
            .map(CollectionId)
    }

    /// Find which collection holds a widget.
    pub fn collection_of(&self, widget: WidgetId) -> Option<CollectionId> {
        self.collections
            .iter()
            .position(|c| c.contains(widget))
            .map(CollectionId)
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn return_policy(&self) -> ReturnPolicy {
        self.return_policy
    }

    pub fn is_dragging(&self) -> bool {
        self.session.dragging.is_some()
    }

    /// Whether the floating copy of the dragged widget should be drawn.
    pub fn should_show_dragging_widget(&self) -> bool {
        self.session.offset != Vec2::ZERO && self.session.dragging.is_some()
    }

    /// Register a reader of session changes.
    pub fn subscribe(&mut self) -> Receiver<ArrangementEvent> {
        self.events.subscribe()
    }

    /// Record a widget's rect from the layout pass.
    pub fn set_widget_rect(&mut self, id: WidgetId, rect: Option<Rect>) -> bool {
        self.widgets.set_rect(id, rect)
    }

    /// Record a collection's rect from the layout pass.
    pub fn set_collection_rect(&mut self, id: CollectionId, rect: Option<Rect>) -> bool {
        match self.collections.get_mut(id.0) {
            Some(collection) => {
                collection.set_rect(rect);
                true
            }
            None => false,
        }
    }

    /// Feed a drag event into the engine.
    pub fn handle_event(&mut self, event: DragEvent) -> Option<DropOutcome> {
        match event {
            DragEvent::Changed(gesture) => {
                self.update_drag(&gesture);
                None
            }
            DragEvent::Ended(_) => self.drop_widget(),
        }
    }

    /// Process a drag update.
    pub fn update_drag(&mut self, gesture: &DragGesture) {
        let hovered = self.hit_test(gesture.location);
        self.set_hovered(hovered);

        match (self.session.dragging, hovered) {
            (None, Some(collection)) => {
                let hit = self.collections[collection.0].widget_at_location(&self.widgets, gesture.location);
                if let Some(widget) = hit {
                    self.begin_drag(widget, collection);
                }
            }
            (Some(_), Some(collection)) => {
                if self.accepts_drop(collection) {
                    self.set_predicted(Some(collection));
                }
            }
            (_, None) => {}
        }

        let Some(dragging) = self.session.dragging else {
            return;
        };

        if let Some(origin) = self.session.origin {
            self.set_offset(origin.to_vec2() + gesture.translation);
        }

        let predicted = self.session.predicted;
        let policy = self.return_policy;
        for (index, collection) in self.collections.iter_mut().enumerate() {
            collection.update(predicted == Some(CollectionId(index)), gesture, Some(dragging), policy);
        }
    }

    /// Finish the drag, placing the widget in the predicted collection.
    ///
    /// Lifting the pointer always ends the drag. Without a source or a
    /// predicted target nothing moves.
    pub fn drop_widget(&mut self) -> Option<DropOutcome> {
        self.set_offset(Vec2::ZERO);

        let outcome = match self.session.dragging {
            Some(widget) => {
                self.session.last_dropped = Some(widget);
                match (self.session.source, self.session.predicted) {
                    (Some(from), Some(to)) => self.commit(widget, from, to),
                    _ => {
                        log::warn!("Drag of widget {} ended without a drop target", widget);
                        None
                    }
                }
            }
            None => None,
        };

        self.session.dragging = None;
        self.session.source = None;
        self.session.origin = None;
        self.set_predicted(None);
        self.set_hovered(None);
        for collection in &mut self.collections {
            collection.clear_preview();
        }

        if let Some(outcome) = outcome {
            self.events.emit(ArrangementEvent::Dropped {
                widget: outcome.widget,
                from: outcome.from,
                to: outcome.to,
            });
        }
        outcome
    }

    /// First collection in priority order containing the point.
    fn hit_test(&self, point: Point) -> Option<CollectionId> {
        self.collections
            .iter()
            .position(|c| c.rect_contains(point))
            .map(CollectionId)
    }

    fn begin_drag(&mut self, widget: WidgetId, source: CollectionId) {
        log::debug!("Picked up widget {} from {}", widget, self.collections[source.0].name());
        self.session.dragging = Some(widget);
        self.session.source = Some(source);
        self.session.origin = self.widgets.rect_of(widget).map(|rect| rect.origin());
        self.events.emit(ArrangementEvent::DragStarted { widget, source });
        self.set_predicted(Some(source));
    }

    /// Whether the dragged widget may be predicted to land in a collection.
    fn accepts_drop(&self, collection: CollectionId) -> bool {
        if self.session.source == Some(collection) {
            return true;
        }
        let Some(widget) = self.session.dragging.and_then(|id| self.widgets.get(id)) else {
            return false;
        };
        let Some(target) = self.collections.get(collection.0) else {
            return false;
        };
        widget.kind.can_remove() && target.is_valid_drop_location(&self.widgets, Some(widget))
    }

    /// Move a widget between collections. Either both steps apply or neither.
    fn commit(&mut self, widget: WidgetId, from: CollectionId, to: CollectionId) -> Option<DropOutcome> {
        if from.0 >= self.collections.len() || to.0 >= self.collections.len() {
            log::warn!("Dropped widget {} into a collection that no longer exists", widget);
            return None;
        }

        let Some(from_index) = self.collections[from.0].position(widget) else {
            log::warn!("Widget {} is no longer in {}", widget, self.collections[from.0].name());
            return None;
        };

        if from == to && self.return_policy == ReturnPolicy::PreserveIndex {
            log::debug!("Widget {} returned to {}", widget, self.collections[to.0].name());
            return Some(DropOutcome {
                widget,
                from,
                to,
                from_index,
                to_index: from_index,
            });
        }

        self.collections[from.0].remove(widget);
        self.collections[to.0].drop(widget);
        log::debug!(
            "Moved widget {} from {} to {}",
            widget,
            self.collections[from.0].name(),
            self.collections[to.0].name()
        );
        Some(DropOutcome {
            widget,
            from,
            to,
            from_index,
            to_index: self.collections[to.0].len() - 1,
        })
    }

    fn set_hovered(&mut self, hovered: Option<CollectionId>) {
        if self.session.hovered != hovered {
            self.session.hovered = hovered;
            self.events.emit(ArrangementEvent::HoverChanged(hovered));
        }
    }

    fn set_predicted(&mut self, predicted: Option<CollectionId>) {
        if self.session.predicted != predicted {
            self.session.predicted = predicted;
            self.events.emit(ArrangementEvent::PredictionChanged(predicted));
        }
    }

    fn set_offset(&mut self, offset: Vec2) {
        if self.session.offset != offset {
            self.session.offset = offset;
            self.events.emit(ArrangementEvent::OffsetChanged(offset));
        }
    }
}
