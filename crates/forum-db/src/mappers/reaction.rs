//! Reaction entity <-> model mapper

use forum_core::entities::{Reaction, ReactionCounts};
use forum_core::error::DomainError;
use forum_core::value_objects::{ReactionValue, RowId};

use crate::models::{ReactionCountsModel, ReactionModel};

use super::from_millis;

/// Convert ReactionModel to Reaction entity
///
/// Fails only if a row slipped past the table's CHECK constraints.
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            user_id: RowId::new(model.user_id),
            target_kind: model.target_type.parse()?,
            target_id: RowId::new(model.target_id),
            value: ReactionValue::try_from(model.value)?,
            created_at: from_millis(model.created_at),
        })
    }
}

impl From<ReactionCountsModel> for ReactionCounts {
    fn from(model: ReactionCountsModel) -> Self {
        ReactionCounts::new(model.like_count, model.dislike_count)
    }
}
