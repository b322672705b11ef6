//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use forum_core::{CommentId, PostId, ReactionValue, RowId, TargetKind, ToggleOutcome, UserId};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Current user response (includes private fields like email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Successful login: who signed in and when the session lapses
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: CurrentUserResponse,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Forum Responses
// ============================================================================

/// Public author reference
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: UserId,
    pub username: String,
}

/// Category response
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Post with its categories and live reaction totals
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub author: AuthorResponse,
    pub title: String,
    pub body: String,
    pub categories: Vec<CategoryResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
    /// The viewer's own reaction; absent for anonymous viewers
    pub my_reaction: Option<ReactionValue>,
    pub created_at: DateTime<Utc>,
}

/// A single post together with its comment thread
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Comment with live reaction totals
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: AuthorResponse,
    pub body: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<ReactionValue>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a toggle, with the totals as they stand afterwards
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReactionResponse {
    pub outcome: ToggleOutcome,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<ReactionValue>,
}

/// Reaction totals for one target
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub target_type: TargetKind,
    pub target_id: RowId,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_reaction: Option<ReactionValue>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
