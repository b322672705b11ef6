//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement `Validate`.

use serde::Deserialize;
use validator::Validate;

/// Posts returned when no `limit` is given
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest accepted `limit`
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    pub password: String,
}

/// User login request
///
/// No format checks: a malformed email simply fails as invalid credentials.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,

    /// Category slugs
    #[validate(length(min = 1, message = "Choose at least one category"))]
    pub categories: Vec<String>,
}

/// Which posts a listing is narrowed to, relative to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFilter {
    /// Posts the viewer wrote
    Mine,
    /// Posts the viewer liked
    Liked,
}

/// Query parameters for listing posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    pub category: Option<String>,
    pub filter: Option<PostFilter>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListPostsQuery {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Offset, never negative
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment must not be empty"))]
    pub body: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like or dislike a post or comment
///
/// `target_type` and `value` stay raw here so that bad input surfaces as the
/// domain's own errors rather than a generic body rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleReactionRequest {
    pub target_type: String,
    #[validate(range(min = 1, message = "target_id must be positive"))]
    pub target_id: i64,
    pub value: i64,
}
