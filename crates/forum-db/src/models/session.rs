//! Session database model

use sqlx::FromRow;

/// Database model for sessions table, joined with the owner's username
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub token: String,
    pub user_id: i64,
    pub expires_at: i64,
    pub created_at: i64,
    pub username: String,
}
