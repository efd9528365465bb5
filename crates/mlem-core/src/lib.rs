//! Mlem layout core
//!
//! Platform-agnostic model of the interaction bar editor: widgets, drop-zone
//! collections and the drag-and-drop engine that rearranges them, plus layout
//! persistence.

pub mod arrangement;
pub mod collection;
pub mod config;
pub mod events;
pub mod gesture;
pub mod layout;
pub mod storage;
pub mod widget;

pub use arrangement::{ArrangementEngine, DragSession, DropOutcome};
pub use collection::{CollectionId, DropRules, LayoutSlot, Rejection, ReturnPolicy, WidgetCollection};
pub use config::{ArrangementConfig, ConfigError, DEFAULT_BAR_CAPACITY};
pub use events::{ArrangementEvent, EventBus};
pub use gesture::{DragEvent, DragGesture, GestureRecognizer, PointerEvent, DEFAULT_MINIMUM_DISTANCE};
pub use layout::{CollectionLayout, LayoutError, LayoutPreset, WidgetLayout, BAR_COLLECTION, TRAY_COLLECTION};
pub use storage::{FileStorage, LayoutPersistence, MemoryStorage, Storage, StorageError, StorageResult};
pub use widget::{LayoutWidget, LayoutWidgetKind, WidgetArena, WidgetId};
