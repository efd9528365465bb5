//! Layouts stored as one JSON file each under `<data dir>/mlem/layouts/`.

use super::{done, BoxFuture, Storage, StorageError, StorageResult};
use crate::layout::WidgetLayout;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const LAYOUTS_DIR: &str = "layouts";
const EXTENSION: &str = "json";

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { action, path, source }
}

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open a layout directory, creating it if needed.
    pub fn new(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir).map_err(io_error("create", &dir))?;
        Ok(Self { dir })
    }

    /// Mlem's data directory, falling back to the home directory.
    pub fn data_dir() -> StorageResult<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join("mlem"))
            .ok_or(StorageError::NoDataDir)
    }

    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::data_dir()?.join(LAYOUTS_DIR))
    }

    pub fn base_path(&self) -> &Path {
        &self.dir
    }

    /// Layout keys become file names; anything outside `[A-Za-z0-9_-]` maps to `_`.
    fn path_for(&self, id: &str) -> PathBuf {
        let stem: String = id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(stem).with_extension(EXTENSION)
    }

    fn write(&self, id: &str, layout: &WidgetLayout) -> StorageResult<()> {
        let path = self.path_for(id);
        let json = layout.to_json().map_err(|source| StorageError::Encode {
            id: id.to_string(),
            source,
        })?;
        fs::write(&path, json).map_err(io_error("write", &path))?;
        log::info!("Saved layout {} to {}", id, path.display());
        Ok(())
    }

    fn read(&self, id: &str) -> StorageResult<WidgetLayout> {
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StorageError::NotFound(id.to_string())),
            Err(e) => return Err(io_error("read", &path)(e)),
        };
        WidgetLayout::from_json(&json).map_err(|source| StorageError::Corrupt { path, source })
    }

    fn remove(&self, id: &str) -> StorageResult<()> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error("delete", &path)(e)),
            _ => Ok(()),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(io_error("list", &self.dir))?;
        Ok(entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
            .collect())
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, layout: &WidgetLayout) -> BoxFuture<'_, StorageResult<()>> {
        done(self.write(id, layout))
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<WidgetLayout>> {
        done(self.read(id))
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        done(self.remove(id))
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        done(self.keys())
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        done(Ok(self.path_for(id).is_file()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutPreset;
    use pollster::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let layout = LayoutPreset::PostInteractionBar.default_layout();

        block_on(storage.save("post", &layout)).unwrap();
        let loaded = block_on(storage.load("post")).unwrap();

        assert_eq!(loaded, layout);
        assert!(dir.path().join("post.json").exists());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let result = block_on(storage.load("broken"));
        assert!(matches!(result, Err(StorageError::Corrupt { path, .. }) if path == dir.path().join("broken.json")));
    }

    #[test]
    fn test_file_storage_list_ignores_other_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let layout = LayoutPreset::PostInteractionBar.default_layout();

        block_on(storage.save("a", &layout)).unwrap();
        block_on(storage.save("b", &layout)).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut list = block_on(storage.list()).unwrap();
        list.sort();
        assert_eq!(list, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let layout = LayoutPreset::CommentInteractionBar.default_layout();

        block_on(storage.save("test", &layout)).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());

        block_on(storage.delete("test")).unwrap();
        assert!(!block_on(storage.exists("test")).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let layout = LayoutPreset::PostInteractionBar.default_layout();

        block_on(storage.save("../post:bar", &layout)).unwrap();

        assert!(dir.path().join("___post_bar.json").exists());
        assert_eq!(block_on(storage.load("../post:bar")).unwrap(), layout);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("mlem").join("layouts");

        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }
}
