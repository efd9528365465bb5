//! Loading and saving the layout of one editor screen.
//!
//! The layout is loaded when the screen opens and written back when it closes,
//! but only if a drop actually changed something.

use crate::arrangement::{ArrangementEngine, DropOutcome};
use crate::layout::{LayoutPreset, WidgetLayout};
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Tracks unsaved changes for a preset's layout.
pub struct LayoutPersistence<S: Storage> {
    storage: Arc<S>,
    preset: LayoutPreset,
    /// Whether the arrangement has unsaved changes.
    dirty: bool,
}

impl<S: Storage> LayoutPersistence<S> {
    pub fn new(storage: Arc<S>, preset: LayoutPreset) -> Self {
        Self {
            storage,
            preset,
            dirty: false,
        }
    }

    pub fn preset(&self) -> LayoutPreset {
        self.preset
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark dirty if the drop changed the arrangement.
    pub fn record_drop(&mut self, outcome: &DropOutcome) {
        if outcome.changed() {
            self.dirty = true;
        }
    }

    /// Load the stored layout, falling back to the preset default.
    pub async fn load(&mut self) -> StorageResult<WidgetLayout> {
        self.dirty = false;
        match self.storage.load(self.preset.key()).await {
            Ok(layout) => Ok(layout),
            Err(StorageError::NotFound(_)) => {
                log::info!("No stored layout for {}, using default", self.preset.key());
                Ok(self.preset.default_layout())
            }
            Err(e) => Err(e),
        }
    }

    /// Save the arrangement if it changed. Returns true if a save happened.
    pub async fn save_on_exit(&mut self, engine: &ArrangementEngine) -> StorageResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let layout = engine.to_layout(self.preset.key());
        self.storage.save(self.preset.key(), &layout).await?;
        self.dirty = false;
        Ok(true)
    }

    /// Forget the stored layout and return the default.
    pub async fn reset(&mut self) -> StorageResult<WidgetLayout> {
        self.storage.delete(self.preset.key()).await?;
        self.dirty = false;
        Ok(self.preset.default_layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionId;
    use crate::config::ArrangementConfig;
    use crate::layout::{BAR_COLLECTION, TRAY_COLLECTION};
    use crate::storage::MemoryStorage;
    use pollster::block_on;
    use crate::widget::LayoutWidgetKind;

    fn engine_for(layout: &WidgetLayout) -> ArrangementEngine {
        ArrangementEngine::from_layout(LayoutPreset::PostInteractionBar, layout, &ArrangementConfig::default())
            .unwrap()
    }

    #[test]
    fn test_load_defaults_when_missing() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = LayoutPersistence::new(storage, LayoutPreset::PostInteractionBar);

        let layout = block_on(persistence.load()).unwrap();
        assert_eq!(layout, LayoutPreset::PostInteractionBar.default_layout());
        assert!(!persistence.is_dirty());
    }

    #[test]
    fn test_clean_exit_does_not_save() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = LayoutPersistence::new(storage.clone(), LayoutPreset::PostInteractionBar);
        let layout = block_on(persistence.load()).unwrap();
        let engine = engine_for(&layout);

        assert!(!block_on(persistence.save_on_exit(&engine)).unwrap());
        assert!(!block_on(storage.exists("post_interaction_bar")).unwrap());
    }

    #[test]
    fn test_dirty_exit_saves() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = LayoutPersistence::new(storage.clone(), LayoutPreset::PostInteractionBar);
        let layout = WidgetLayout::new("post_interaction_bar")
            .with_collection(BAR_COLLECTION, vec![LayoutWidgetKind::InfoStack])
            .with_collection(TRAY_COLLECTION, vec![LayoutWidgetKind::Share]);
        let engine = engine_for(&layout);

        let outcome = DropOutcome {
            widget: engine.collections()[1].items()[0],
            from: CollectionId(1),
            to: CollectionId(0),
            from_index: 0,
            to_index: 1,
        };
        persistence.record_drop(&outcome);
        assert!(persistence.is_dirty());

        assert!(block_on(persistence.save_on_exit(&engine)).unwrap());
        assert!(!persistence.is_dirty());
        assert_eq!(block_on(storage.load("post_interaction_bar")).unwrap(), layout);
    }

    #[test]
    fn test_return_to_source_is_not_a_change() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = LayoutPersistence::new(storage, LayoutPreset::PostInteractionBar);
        let engine = engine_for(&LayoutPreset::PostInteractionBar.default_layout());

        let outcome = DropOutcome {
            widget: engine.collections()[0].items()[0],
            from: CollectionId(0),
            to: CollectionId(0),
            from_index: 0,
            to_index: 0,
        };
        persistence.record_drop(&outcome);
        assert!(!persistence.is_dirty());
    }

    #[test]
    fn test_reorder_within_collection_is_a_change() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = LayoutPersistence::new(storage, LayoutPreset::PostInteractionBar);
        let engine = engine_for(&LayoutPreset::PostInteractionBar.default_layout());

        let outcome = DropOutcome {
            widget: engine.collections()[0].items()[0],
            from: CollectionId(0),
            to: CollectionId(0),
            from_index: 0,
            to_index: 3,
        };
        persistence.record_drop(&outcome);
        assert!(persistence.is_dirty());
    }

    #[test]
    fn test_reset() {
        let storage = Arc::new(MemoryStorage::new());
        let custom = WidgetLayout::new("post_interaction_bar")
            .with_collection(BAR_COLLECTION, vec![LayoutWidgetKind::InfoStack]);
        block_on(storage.save("post_interaction_bar", &custom)).unwrap();
        let mut persistence = LayoutPersistence::new(storage.clone(), LayoutPreset::PostInteractionBar);

        assert_eq!(block_on(persistence.load()).unwrap(), custom);
        let layout = block_on(persistence.reset()).unwrap();

        assert_eq!(layout, LayoutPreset::PostInteractionBar.default_layout());
        assert!(!block_on(storage.exists("post_interaction_bar")).unwrap());
    }
}
