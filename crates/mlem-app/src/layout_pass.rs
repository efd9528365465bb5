//! A plain row layout standing in for the UI toolkit's layout pass.
//!
//! Each collection is one row; widgets sit left to right with free space
//! after the last one to drop into.

use kurbo::Rect;
use mlem_core::{ArrangementEngine, CollectionId, LayoutWidgetKind, WidgetId};

pub const ROW_HEIGHT: f64 = 60.0;
pub const ROW_GAP: f64 = 20.0;
pub const MIN_ROW_WIDTH: f64 = 360.0;
/// Empty space kept at the end of every row.
pub const FREE_SPACE: f64 = 80.0;

/// Width of a widget in the row.
pub fn widget_width(kind: LayoutWidgetKind) -> f64 {
    match kind {
        LayoutWidgetKind::InfoStack => 120.0,
        LayoutWidgetKind::UpvoteCounter
        | LayoutWidgetKind::DownvoteCounter
        | LayoutWidgetKind::ScoreCounter => 64.0,
        LayoutWidgetKind::Spacer => 24.0,
        LayoutWidgetKind::FlexibleSpacer => 48.0,
        _ => 44.0,
    }
}

/// Assign rects to every collection and widget.
pub fn lay_out(engine: &mut ArrangementEngine) {
    let rows: Vec<(CollectionId, Vec<(WidgetId, f64)>)> = engine
        .collections()
        .iter()
        .enumerate()
        .map(|(index, collection)| {
            let items = collection
                .items()
                .iter()
                .filter_map(|&id| engine.widgets().kind_of(id).map(|kind| (id, widget_width(kind))))
                .collect();
            (CollectionId(index), items)
        })
        .collect();

    for (collection, items) in rows {
        let y = collection.0 as f64 * (ROW_HEIGHT + ROW_GAP);
        let mut x = 0.0;
        for (widget, width) in items {
            engine.set_widget_rect(widget, Some(Rect::new(x, y, x + width, y + ROW_HEIGHT)));
            x += width;
        }
        let row_width = (x + FREE_SPACE).max(MIN_ROW_WIDTH);
        engine.set_collection_rect(collection, Some(Rect::new(0.0, y, row_width, y + ROW_HEIGHT)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlem_core::{ArrangementConfig, LayoutPreset};

    #[test]
    fn test_rows_do_not_overlap() {
        let preset = LayoutPreset::CommentInteractionBar;
        let mut engine =
            ArrangementEngine::from_layout(preset, &preset.default_layout(), &ArrangementConfig::default()).unwrap();

        lay_out(&mut engine);

        let bar = engine.collections()[0].rect().unwrap();
        let tray = engine.collections()[1].rect().unwrap();
        assert!(bar.intersect(tray).area() == 0.0);
        assert!(tray.width() >= MIN_ROW_WIDTH);
    }

    #[test]
    fn test_widgets_inside_their_row() {
        let preset = LayoutPreset::PostInteractionBar;
        let mut engine =
            ArrangementEngine::from_layout(preset, &preset.default_layout(), &ArrangementConfig::default()).unwrap();

        lay_out(&mut engine);

        for collection in engine.collections() {
            let row = collection.rect().unwrap();
            for &id in collection.items() {
                let rect = engine.widgets().rect_of(id).unwrap();
                assert_eq!(row.union(rect), row);
                assert_eq!(collection.widget_at_location(engine.widgets(), rect.center()), Some(id));
            }
        }
    }
}
