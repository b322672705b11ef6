//! Reaction entity - a user's like or dislike on a post or comment

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ReactionValue, RowId, TargetKind, UserId};

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: UserId,
    pub target_kind: TargetKind,
    pub target_id: RowId,
    pub value: ReactionValue,
    pub created_at: DateTime<Utc>,
}

/// What a toggle did to the caller's reaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    /// No prior reaction; one was recorded
    Created,
    /// The prior reaction had the opposite value and was flipped
    Updated,
    /// The prior reaction had the same value and was withdrawn
    Removed,
}

/// Live like/dislike totals for one target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub like_count: i64,
    pub dislike_count: i64,
}

impl ReactionCounts {
    /// Create a new ReactionCounts
    pub fn new(like_count: i64, dislike_count: i64) -> Self {
        Self {
            like_count,
            dislike_count,
        }
    }
}
