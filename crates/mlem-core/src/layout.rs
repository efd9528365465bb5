//! Persisted widget layouts and the built-in interaction bar presets.

use crate::collection::{DropRules, Rejection};
use crate::widget::LayoutWidgetKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the interaction bar collection.
pub const BAR_COLLECTION: &str = "bar";
/// Name of the collection holding unused widgets.
pub const TRAY_COLLECTION: &str = "tray";

/// Errors raised while turning a stored layout into an arrangement.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    #[error("Collection {0} is listed more than once")]
    DuplicateCollection(String),
    #[error("{kind:?} is not available in {collection}")]
    NotInPalette {
        collection: String,
        kind: LayoutWidgetKind,
    },
    #[error("{0:?} appears more than once")]
    DuplicateKind(LayoutWidgetKind),
    #[error("{kind:?} is missing from {collection}")]
    MissingRequired {
        collection: String,
        kind: LayoutWidgetKind,
    },
    #[error("Cannot place {kind:?} in {collection}: {reason}")]
    Rejected {
        collection: String,
        kind: LayoutWidgetKind,
        reason: Rejection,
    },
    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stored contents of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLayout {
    pub name: String,
    pub widgets: Vec<LayoutWidgetKind>,
}

/// A stored arrangement: the kinds held by each collection, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    /// Storage key of the layout.
    pub id: String,
    pub collections: Vec<CollectionLayout>,
}

impl WidgetLayout {
    /// Create a layout with no collections.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collections: Vec::new(),
        }
    }

    /// Add a collection.
    pub fn with_collection(mut self, name: impl Into<String>, widgets: Vec<LayoutWidgetKind>) -> Self {
        self.collections.push(CollectionLayout {
            name: name.into(),
            widgets,
        });
        self
    }

    /// Get the widgets stored for a collection.
    pub fn collection(&self, name: &str) -> Option<&[LayoutWidgetKind]> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.widgets.as_slice())
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The interaction bars a user can customise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreset {
    PostInteractionBar,
    CommentInteractionBar,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 2] = [Self::PostInteractionBar, Self::CommentInteractionBar];

    /// Storage key of the preset's layout.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PostInteractionBar => "post_interaction_bar",
            Self::CommentInteractionBar => "comment_interaction_bar",
        }
    }

    /// Parse a short name (`post`, `comment`) or a storage key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "post" | "post_interaction_bar" => Some(Self::PostInteractionBar),
            "comment" | "comment_interaction_bar" => Some(Self::CommentInteractionBar),
            _ => None,
        }
    }

    /// Widget kinds available for this bar.
    pub fn palette(&self) -> &'static [LayoutWidgetKind] {
        use LayoutWidgetKind::*;
        match self {
            Self::PostInteractionBar => &[
                InfoStack,
                Upvote,
                Downvote,
                Save,
                Reply,
                Share,
                UpvoteCounter,
                DownvoteCounter,
                ScoreCounter,
                Spacer,
                FlexibleSpacer,
            ],
            Self::CommentInteractionBar => &LayoutWidgetKind::ALL,
        }
    }

    /// Bar contents of a fresh install.
    pub fn default_bar(&self) -> &'static [LayoutWidgetKind] {
        use LayoutWidgetKind::*;
        match self {
            Self::PostInteractionBar => &[ScoreCounter, InfoStack, Save, Reply],
            Self::CommentInteractionBar => &[Upvote, Downvote, InfoStack, Reply],
        }
    }

    /// Collections in hit-test priority order: the bar wins over the tray.
    pub fn collection_specs(&self, bar_capacity: usize) -> [(&'static str, DropRules); 2] {
        [
            (BAR_COLLECTION, DropRules::bar(bar_capacity)),
            (TRAY_COLLECTION, DropRules::tray()),
        ]
    }

    /// Default layout: the default bar, with the rest of the palette in the tray.
    pub fn default_layout(&self) -> WidgetLayout {
        let bar = self.default_bar().to_vec();
        let tray = self
            .palette()
            .iter()
            .copied()
            .filter(|kind| !bar.contains(kind))
            .collect();
        WidgetLayout::new(self.key())
            .with_collection(BAR_COLLECTION, bar)
            .with_collection(TRAY_COLLECTION, tray)
    }
}
