//! Reaction database model

use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: i64,
    pub target_type: String,
    pub target_id: i64,
    pub value: i64,
    pub created_at: i64,
}

/// Aggregated like/dislike totals (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountsModel {
    pub like_count: i64,
    pub dislike_count: i64,
}
