//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreatePostRequest, ListPostsQuery, LoginRequest, PostFilter,
    RegisterRequest, ToggleReactionRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

// Re-export commonly used response types
pub use responses::{
    AuthorResponse, CategoryResponse, CommentResponse, CurrentUserResponse, HealthChecks,
    HealthResponse, LoginResponse, PostDetailResponse, PostResponse, ReactionSummaryResponse,
    ReadinessResponse, ToggleReactionResponse,
};
