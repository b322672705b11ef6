//! Comment database model

use sqlx::FromRow;

/// Database model for comments table, joined with the author's username
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub username: String,
    pub body: String,
    pub created_at: i64,
}
