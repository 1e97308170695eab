//! Session data models.

use serde::{Deserialize, Serialize};

/// The user's verdict on the photo under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Keep the photo and move on.
    Keep,
    /// Stage the photo for deletion.
    Delete,
}

impl Decision {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Delete => "delete",
        }
    }
}

/// A completed swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeCommit {
    /// Card flung to the left.
    Left,
    /// Card flung to the right.
    Right,
}

impl From<SwipeCommit> for Decision {
    fn from(commit: SwipeCommit) -> Self {
        match commit {
            SwipeCommit::Left => Self::Delete,
            SwipeCommit::Right => Self::Keep,
        }
    }
}

/// Position within the visible photos, for the "3/10" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Visible photos already reviewed.
    pub reviewed: usize,
    /// Visible photos in the pass.
    pub total: usize,
}

impl Progress {
    /// Visible photos still to review.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.reviewed)
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", (self.reviewed + 1).min(self.total), self.total)
    }
}

/// Outcome of a finished pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PassSummary {
    /// Photos in the working set.
    pub total: usize,
    /// Photos reviewed and left in the library.
    pub kept: usize,
    /// Photos of this pass currently staged for deletion.
    pub staged: usize,
}

impl PassSummary {
    /// Whether the user kept every photo.
    #[must_use]
    pub const fn kept_everything(&self) -> bool {
        self.staged == 0
    }
}
