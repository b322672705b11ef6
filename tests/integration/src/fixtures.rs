//! Test fixtures and data generators
//!
//! Provides reusable request bodies and the response shapes tests read back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("user{suffix}@example.com"),
            username: format!("user{suffix}"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// The signed-in user
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Login response body
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub expires_at: String,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub categories: Vec<String>,
}

impl CreatePostRequest {
    pub fn in_categories(categories: &[&str]) -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Post {suffix}"),
            body: format!("Body of post {suffix}"),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// Toggle reaction request
#[derive(Debug, Serialize)]
pub struct ToggleReactionRequest {
    pub target_type: String,
    pub target_id: i64,
    pub value: i64,
}

impl ToggleReactionRequest {
    pub fn post(target_id: i64, value: i64) -> Self {
        Self {
            target_type: "post".to_string(),
            target_id,
            value,
        }
    }

    pub fn comment(target_id: i64, value: i64) -> Self {
        Self {
            target_type: "comment".to_string(),
            target_id,
            value,
        }
    }
}

/// Author reference
#[derive(Debug, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
}

/// Category
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Post
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub author: AuthorResponse,
    pub title: String,
    pub body: String,
    pub categories: Vec<CategoryResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<i64>,
}

/// Post with comments
#[derive(Debug, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Comment
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub author: AuthorResponse,
    pub body: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<i64>,
}

/// Toggle result
#[derive(Debug, Deserialize)]
pub struct ToggleReactionResponse {
    pub outcome: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<i64>,
}

/// Reaction totals for one target
#[derive(Debug, Deserialize)]
pub struct ReactionSummaryResponse {
    pub target_type: String,
    pub target_id: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<i64>,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
