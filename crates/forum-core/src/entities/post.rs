//! Post entity - a thread opener, tagged with one or more categories

use chrono::{DateTime, Utc};

use crate::value_objects::{PostId, UserId};

/// Maximum post title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum post body length in characters
pub const MAX_POST_BODY_LENGTH: usize = 10_000;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    /// Author's username, joined in on read
    pub author_username: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Values needed to insert a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub category_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Build a post with trimmed title and body
    pub fn new(author_id: UserId, title: &str, body: &str, category_ids: Vec<i64>) -> Self {
        Self {
            author_id,
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            category_ids,
            created_at: Utc::now(),
        }
    }
}
