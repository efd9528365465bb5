//! Layouts held in a map, for tests and previews.

use super::{done, BoxFuture, Storage, StorageError, StorageResult};
use crate::layout::WidgetLayout;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    layouts: RwLock<HashMap<String, WidgetLayout>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, WidgetLayout>>> {
        self.layouts.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, WidgetLayout>>> {
        self.layouts.write().map_err(|_| StorageError::Poisoned)
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, layout: &WidgetLayout) -> BoxFuture<'_, StorageResult<()>> {
        done(self.write().map(|mut layouts| {
            layouts.insert(id.to_string(), layout.clone());
        }))
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<WidgetLayout>> {
        done(self.read().and_then(|layouts| {
            layouts
                .get(id)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(id.to_string()))
        }))
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        done(self.write().map(|mut layouts| {
            layouts.remove(id);
        }))
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        done(self.read().map(|layouts| layouts.keys().cloned().collect()))
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        done(self.read().map(|layouts| layouts.contains_key(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutPreset;
    use pollster::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let layout = LayoutPreset::PostInteractionBar.default_layout();

        block_on(storage.save("test", &layout)).unwrap();
        let loaded = block_on(storage.load("test")).unwrap();

        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(id)) if id == "nonexistent"));
    }

    #[test]
    fn test_save_replaces() {
        let storage = MemoryStorage::new();
        block_on(storage.save("bar", &LayoutPreset::PostInteractionBar.default_layout())).unwrap();
        block_on(storage.save("bar", &LayoutPreset::CommentInteractionBar.default_layout())).unwrap();

        assert_eq!(
            block_on(storage.load("bar")).unwrap(),
            LayoutPreset::CommentInteractionBar.default_layout()
        );
        assert_eq!(block_on(storage.list()).unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();
        let layout = LayoutPreset::CommentInteractionBar.default_layout();

        block_on(storage.save("test", &layout)).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());
        block_on(storage.delete("test")).unwrap();
        assert!(!block_on(storage.exists("test")).unwrap());
        block_on(storage.delete("test")).unwrap();
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        for preset in LayoutPreset::ALL {
            block_on(storage.save(preset.key(), &preset.default_layout())).unwrap();
        }

        let mut list = block_on(storage.list()).unwrap();
        list.sort();
        assert_eq!(list, vec!["comment_interaction_bar", "post_interaction_bar"]);
    }
}
