//! Widget kind definitions.

use serde::{Deserialize, Serialize};

/// The type of a layout widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutWidgetKind {
    /// Author, community and age summary. Always present in the bar.
    InfoStack,
    Upvote,
    Downvote,
    Save,
    Reply,
    Share,
    UpvoteCounter,
    DownvoteCounter,
    ScoreCounter,
    /// Mark a report or reply as resolved.
    Resolve,
    /// Fixed-width gap.
    Spacer,
    /// Gap that takes up the remaining width.
    FlexibleSpacer,
}

impl LayoutWidgetKind {
    /// Every widget kind, in palette order.
    pub const ALL: [LayoutWidgetKind; 12] = [
        Self::InfoStack,
        Self::Upvote,
        Self::Downvote,
        Self::Save,
        Self::Reply,
        Self::Share,
        Self::UpvoteCounter,
        Self::DownvoteCounter,
        Self::ScoreCounter,
        Self::Resolve,
        Self::Spacer,
        Self::FlexibleSpacer,
    ];

    /// Whether the widget may leave the collection it lives in.
    pub fn can_remove(&self) -> bool {
        !matches!(self, Self::InfoStack)
    }

    /// Whether more than one widget of this kind may share a collection
    /// that otherwise requires unique kinds.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::Spacer | Self::FlexibleSpacer)
    }

    /// Snake-case name, as used in persisted layouts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InfoStack => "info_stack",
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
            Self::Save => "save",
            Self::Reply => "reply",
            Self::Share => "share",
            Self::UpvoteCounter => "upvote_counter",
            Self::DownvoteCounter => "downvote_counter",
            Self::ScoreCounter => "score_counter",
            Self::Resolve => "resolve",
            Self::Spacer => "spacer",
            Self::FlexibleSpacer => "flexible_spacer",
        }
    }

    /// Look up a kind by its snake-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_info_stack_is_pinned() {
        for kind in LayoutWidgetKind::ALL {
            assert_eq!(kind.can_remove(), kind != LayoutWidgetKind::InfoStack);
        }
    }

    #[test]
    fn test_name_matches_serde() {
        for kind in LayoutWidgetKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
            assert_eq!(LayoutWidgetKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(LayoutWidgetKind::from_name("boost"), None);
    }

    #[test]
    fn test_spacers_are_repeatable() {
        assert!(LayoutWidgetKind::Spacer.is_repeatable());
        assert!(LayoutWidgetKind::FlexibleSpacer.is_repeatable());
        assert!(!LayoutWidgetKind::Upvote.is_repeatable());
    }
}
