//! Change notifications for the presentation layer.

use crate::collection::CollectionId;
use crate::widget::WidgetId;
use kurbo::Vec2;
use std::sync::mpsc::{channel, Receiver, Sender};

/// A change to the drag session that readers may want to redraw for.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrangementEvent {
    /// A widget was picked up.
    DragStarted {
        widget: WidgetId,
        source: CollectionId,
    },
    /// The collection under the pointer changed.
    HoverChanged(Option<CollectionId>),
    /// The collection that would receive the widget changed.
    PredictionChanged(Option<CollectionId>),
    /// The floating widget moved.
    OffsetChanged(Vec2),
    /// A widget was placed.
    Dropped {
        widget: WidgetId,
        from: CollectionId,
        to: CollectionId,
    },
}

/// Broadcasts events to every live subscriber.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<ArrangementEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new reader.
    pub fn subscribe(&mut self) -> Receiver<ArrangementEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send an event to all subscribers, dropping the ones that hung up.
    pub fn emit(&mut self, event: ArrangementEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_to_all() {
        let mut bus = EventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.emit(ArrangementEvent::HoverChanged(Some(CollectionId(1))));

        assert_eq!(first.try_recv(), Ok(ArrangementEvent::HoverChanged(Some(CollectionId(1)))));
        assert_eq!(second.try_recv(), Ok(ArrangementEvent::HoverChanged(Some(CollectionId(1)))));
    }

    #[test]
    fn test_disconnected_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.emit(ArrangementEvent::PredictionChanged(None));

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(ArrangementEvent::PredictionChanged(None)));
    }
}
