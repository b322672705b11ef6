//! Service context - dependency container for services
//!
//! Holds the database pool, all repositories and the session lifetime.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use forum_core::entities::Session;
use forum_core::traits::{
    CategoryRepository, CommentRepository, PostRepository, ReactionRepository, SessionRepository,
    UserRepository,
};
use forum_db::{
    SqliteCategoryRepository, SqliteCommentRepository, SqlitePool, SqlitePostRepository,
    SqliteReactionRepository, SqliteSessionRepository, SqliteUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It is built once at startup and shared behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: SqlitePool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    category_repo: Arc<dyn CategoryRepository>,

    // Sessions
    session_ttl: chrono::Duration,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    // === Sessions ===

    /// How long a freshly issued session lives
    pub fn session_ttl(&self) -> chrono::Duration {
        self.session_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"SqlitePool")
            .field("repositories", &"...")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<SqlitePool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    session_ttl: Option<Duration>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: SqlitePool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Use the SQLite repositories for every port, each bounded by `operation_timeout`
    pub fn sqlite_repositories(self, pool: SqlitePool, operation_timeout: Duration) -> Self {
        self.user_repo(Arc::new(
            SqliteUserRepository::new(pool.clone()).with_timeout(operation_timeout),
        ))
        .session_repo(Arc::new(
            SqliteSessionRepository::new(pool.clone()).with_timeout(operation_timeout),
        ))
        .reaction_repo(Arc::new(
            SqliteReactionRepository::new(pool.clone()).with_timeout(operation_timeout),
        ))
        .post_repo(Arc::new(
            SqlitePostRepository::new(pool.clone()).with_timeout(operation_timeout),
        ))
        .comment_repo(Arc::new(
            SqliteCommentRepository::new(pool.clone()).with_timeout(operation_timeout),
        ))
        .category_repo(Arc::new(
            SqliteCategoryRepository::new(pool.clone()).with_timeout(operation_timeout),
        ))
        .pool(pool)
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing,
    /// the session lifetime is zero, or it exceeds `Session::max_ttl()`
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let ttl = self
            .session_ttl
            .ok_or_else(|| ServiceError::validation("session_ttl is required"))?;
        let session_ttl = chrono::Duration::from_std(ttl)
            .ok()
            .filter(|ttl| *ttl > chrono::Duration::zero() && *ttl <= Session::max_ttl())
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "session_ttl must be between 1 second and {} days",
                    Session::max_ttl().num_days()
                ))
            })?;

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            user_repo: required(self.user_repo, "user_repo")?,
            session_repo: required(self.session_repo, "session_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            category_repo: required(self.category_repo, "category_repo")?,
            session_ttl,
        })
    }
}

fn required<T>(dependency: Option<T>, name: &str) -> ServiceResult<T> {
    dependency.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}
