//! SQLite implementation of CommentRepository

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use forum_core::entities::Comment;
use forum_core::traits::{CommentRepository, RepoResult};
use forum_core::value_objects::{CommentId, PostId, RowId, UserId};

use crate::mappers::to_millis;
use crate::models::CommentModel;

use super::error::{bounded, map_db_error};
use super::DEFAULT_OPERATION_TIMEOUT;

/// SQLite implementation of CommentRepository
#[derive(Clone)]
pub struct SqliteCommentRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteCommentRepository {
    /// Create a new SqliteCommentRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the per-call deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, CommentModel>(
                r"
                SELECT c.id, c.post_id, c.user_id, u.username, c.body, c.created_at
                FROM comments c
                INNER JOIN users u ON u.id = c.user_id
                WHERE c.id = ?
                ",
            )
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let rows = bounded(self.timeout, async {
            sqlx::query_as::<_, CommentModel>(
                r"
                SELECT c.id, c.post_id, c.user_id, u.username, c.body, c.created_at
                FROM comments c
                INNER JOIN users u ON u.id = c.user_id
                WHERE c.post_id = ?
                ORDER BY c.created_at ASC, c.id ASC
                ",
            )
            .bind(post_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, body))]
    async fn create(
        &self,
        post_id: PostId,
        author_id: UserId,
        body: &str,
    ) -> RepoResult<CommentId> {
        let result = bounded(self.timeout, async {
            sqlx::query(
                r"
                INSERT INTO comments (post_id, user_id, body, created_at)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(post_id.into_inner())
            .bind(author_id.into_inner())
            .bind(body)
            .bind(to_millis(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(RowId::new(result.last_insert_rowid()))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: CommentId) -> RepoResult<bool> {
        bounded(self.timeout, async {
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comments WHERE id = ?)")
                .bind(id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await
    }
}
