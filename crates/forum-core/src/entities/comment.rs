//! Comment entity - a reply under a post

use chrono::{DateTime, Utc};

use crate::value_objects::{CommentId, PostId, UserId};

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
