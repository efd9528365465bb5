//! Scripted drags fed through the gesture recognizer and engine.

use crate::layout_pass::FREE_SPACE;
use kurbo::{Point, Rect};
use mlem_core::{
    ArrangementEngine, CollectionId, DropOutcome, GestureRecognizer, LayoutWidgetKind, PointerEvent,
    WidgetId,
};
use thiserror::Error;

/// Number of intermediate pointer moves in a scripted drag.
const DRAG_STEPS: usize = 12;
/// Distance kept between the pointer and the widget's edges at pickup.
const EDGE_INSET: f64 = 1.0;
/// Extra travel on the first move so rounding never leaves it short of the
/// activation distance.
const NUDGE_MARGIN: f64 = 0.5;

/// First widget of a kind, in collection priority order.
pub fn find_widget(engine: &ArrangementEngine, kind: LayoutWidgetKind) -> Option<WidgetId> {
    engine
        .collections()
        .iter()
        .flat_map(|collection| collection.items().iter().copied())
        .find(|&id| engine.widgets().kind_of(id) == Some(kind))
}

/// Why a scripted drag could not be performed.
#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("Widget or collection has not been laid out")]
    NotLaidOut,
    #[error("Minimum drag distance {0} does not fit inside the widget")]
    WidgetTooSmall(f64),
}

/// Pointer events for a drag of the widget at `from` to `end`.
///
/// The pointer goes down near one corner of the widget and first moves
/// toward the opposite corner, just far enough to start the drag. The drag
/// therefore begins while the pointer is still over the widget.
pub fn drag_path(from: Rect, end: Point, minimum_distance: f64) -> Result<Vec<PointerEvent>, ReplayError> {
    let inner = Rect::new(from.x0 + EDGE_INSET, from.y0 + EDGE_INSET, from.x1 - EDGE_INSET, from.y1 - EDGE_INSET);
    let (start, far) = if end.x >= from.center().x {
        (Point::new(inner.x0, inner.y0), Point::new(inner.x1, inner.y1))
    } else {
        (Point::new(inner.x1, inner.y0), Point::new(inner.x0, inner.y1))
    };

    let span = far - start;
    let length = span.hypot();
    if inner.width() <= 0.0 || inner.height() <= 0.0 || length < minimum_distance {
        return Err(ReplayError::WidgetTooSmall(minimum_distance));
    }
    let travel = (minimum_distance + NUDGE_MARGIN).min(length);
    let nudge = start + span * (travel / length);

    let mut events = vec![
        PointerEvent::Down { position: start },
        PointerEvent::Move { position: nudge },
    ];
    events.extend((1..=DRAG_STEPS).map(|step| PointerEvent::Move {
        position: nudge.lerp(end, step as f64 / DRAG_STEPS as f64),
    }));
    events.push(PointerEvent::Up { position: end });
    Ok(events)
}

/// Drag a laid-out widget into the free space of a collection.
pub fn drag_widget(
    engine: &mut ArrangementEngine,
    widget: WidgetId,
    target: CollectionId,
    minimum_distance: f64,
) -> Result<Option<DropOutcome>, ReplayError> {
    let from = engine.widgets().rect_of(widget).ok_or(ReplayError::NotLaidOut)?;
    let row = engine
        .collection(target)
        .and_then(|collection| collection.rect())
        .ok_or(ReplayError::NotLaidOut)?;
    let end = Point::new(row.x1 - FREE_SPACE / 2.0, row.center().y);

    let mut recognizer = GestureRecognizer::new(minimum_distance);
    let mut outcome = None;
    for event in drag_path(from, end, minimum_distance)? {
        if let Some(drag) = recognizer.handle_pointer_event(event) {
            if let Some(result) = engine.handle_event(drag) {
                outcome = Some(result);
            }
        }
    }
    Ok(outcome)
}
