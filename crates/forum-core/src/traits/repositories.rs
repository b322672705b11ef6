//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method is a single storage round trip
//! (or one transaction) and is safe to call concurrently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Category, Comment, NewPost, Post, Reaction, ReactionCounts, Session, ToggleOutcome, User,
};
use crate::error::DomainError;
use crate::value_objects::{
    CommentId, PostId, ReactionValue, RowId, SessionToken, TargetKind, UserId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Insert a user and return the assigned id
    ///
    /// Fails with `DomainError::DuplicateIdentity` when either the email or the
    /// username is already taken.
    async fn create(&self, email: &str, username: &str, password_hash: &str) -> RepoResult<UserId>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Session Repository
// ============================================================================

/// A stored session joined with the owner's username
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session: Session,
    pub username: String,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store `session`, replacing any existing session of the same user
    async fn upsert(&self, session: &Session) -> RepoResult<()>;

    /// Look a token up, regardless of expiry
    async fn find_by_token(&self, token: &SessionToken) -> RepoResult<Option<SessionRecord>>;

    /// Delete the session holding `token`; succeeds when there is none
    async fn delete_by_token(&self, token: &SessionToken) -> RepoResult<()>;

    /// Delete every session with `expires_at <= now`, returning how many went
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a user's reaction on a target
    async fn find(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
    ) -> RepoResult<Option<Reaction>>;

    /// Apply the toggle state machine atomically
    ///
    /// none -> insert (`Created`); same value -> delete (`Removed`);
    /// opposite value -> update (`Updated`).
    async fn toggle(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
        value: ReactionValue,
    ) -> RepoResult<ToggleOutcome>;

    /// Count likes and dislikes on a target
    async fn counts(&self, target_kind: TargetKind, target_id: RowId) -> RepoResult<ReactionCounts>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Filters and paging for post listings
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Only posts filed under this category slug
    pub category: Option<String>,
    /// Only posts written by this user
    pub author_id: Option<UserId>,
    /// Only posts this user has liked
    pub liked_by: Option<UserId>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List posts newest first
    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;

    /// Insert a post together with its category links
    async fn create(&self, post: &NewPost) -> RepoResult<PostId>;

    /// Check whether a post exists
    async fn exists(&self, id: PostId) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// List comments of a post, oldest first
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;

    /// Insert a comment
    async fn create(&self, post_id: PostId, author_id: UserId, body: &str) -> RepoResult<CommentId>;

    /// Check whether a comment exists
    async fn exists(&self, id: CommentId) -> RepoResult<bool>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name
    async fn list(&self) -> RepoResult<Vec<Category>>;

    /// Categories matching the given slugs (unknown slugs are skipped)
    async fn find_by_slugs(&self, slugs: &[String]) -> RepoResult<Vec<Category>>;

    /// Categories a post is filed under
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Category>>;

    /// Insert the default categories if none exist; returns how many were added
    async fn seed_defaults(&self) -> RepoResult<u64>;
}
