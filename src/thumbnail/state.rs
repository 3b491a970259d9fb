//! Thumbnail lifecycle state

use serde::Serialize;
use std::fmt;

/// Loading state of a single thumbnail.
///
/// A path moves through `NotLoaded -> Pending -> Loading -> Ready | Error`.
/// Unknown paths report `NotLoaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailState {
    /// Not in the cache and not requested
    #[default]
    NotLoaded,
    /// Load request queued
    Pending,
    /// Currently being rendered by the loader
    Loading,
    /// Rendered and cached
    Ready,
    /// Rendering failed
    Error,
}

impl ThumbnailState {
    /// All states, in lifecycle order.
    pub const ALL: [ThumbnailState; 5] = [
        ThumbnailState::NotLoaded,
        ThumbnailState::Pending,
        ThumbnailState::Loading,
        ThumbnailState::Ready,
        ThumbnailState::Error,
    ];

    /// Whether the loader has finished with this entry (Ready or Error).
    pub fn is_settled(self) -> bool {
        matches!(self, ThumbnailState::Ready | ThumbnailState::Error)
    }

    /// Whether a placeholder should show the loading animation.
    pub fn is_in_progress(self) -> bool {
        matches!(self, ThumbnailState::Pending | ThumbnailState::Loading)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThumbnailState::NotLoaded => "not_loaded",
            ThumbnailState::Pending => "pending",
            ThumbnailState::Loading => "loading",
            ThumbnailState::Ready => "ready",
            ThumbnailState::Error => "error",
        }
    }

    /// Parse a state name as printed by [`ThumbnailState::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == s)
    }
}

impl fmt::Display for ThumbnailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
