//! Persisted widget layouts.
//!
//! Backends finish their work before returning, so every future is already
//! resolved. The boxed future keeps room for backends that cannot do that.

mod file;
mod memory;
mod persistence;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persistence::LayoutPersistence;

use crate::layout::{LayoutError, WidgetLayout};
use std::future::{ready, Future};
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No stored layout for {0}")]
    NotFound(String),
    #[error("Layout {id} could not be encoded: {source}")]
    Encode {
        id: String,
        #[source]
        source: LayoutError,
    },
    #[error("{} is not a valid layout: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No data directory on this system")]
    NoDataDir,
    #[error("Layout store is poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Wrap an already computed result.
fn done<'a, T: 'a>(result: T) -> BoxFuture<'a, T> {
    Box::pin(ready(result))
}

/// Keyed store of layouts.
pub trait Storage: Send + Sync {
    fn save(&self, id: &str, layout: &WidgetLayout) -> BoxFuture<'_, StorageResult<()>>;

    /// Fails with [`StorageError::NotFound`] when nothing is stored under `id`.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<WidgetLayout>>;

    /// Deleting a missing layout succeeds.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
