//! Post database model

use sqlx::FromRow;

/// Database model for posts table, joined with the author's username
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub title: String,
    pub body: String,
    pub created_at: i64,
}
