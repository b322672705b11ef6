//! SQLite implementation of SessionRepository

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use forum_core::entities::Session;
use forum_core::traits::{RepoResult, SessionRecord, SessionRepository};
use forum_core::value_objects::SessionToken;

use crate::mappers::to_millis;
use crate::models::SessionModel;

use super::error::{bounded, map_db_error};
use super::DEFAULT_OPERATION_TIMEOUT;

/// SQLite implementation of SessionRepository
///
/// `sessions.user_id` is unique, so an upsert keyed on it is what keeps a user
/// down to a single live token.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteSessionRepository {
    /// Create a new SqliteSessionRepository
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
impl SessionRepository for SqliteSessionRepository {
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn upsert(&self, session: &Session) -> RepoResult<()> {
        bounded(self.timeout, async {
            sqlx::query(
                r"
                INSERT INTO sessions (token, user_id, expires_at, created_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(user_id) DO UPDATE SET
                    token = excluded.token,
                    expires_at = excluded.expires_at,
                    created_at = excluded.created_at
                ",
            )
            .bind(session.token.as_str())
            .bind(session.user_id.into_inner())
            .bind(to_millis(session.expires_at))
            .bind(to_millis(session.created_at))
            .execute(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn find_by_token(&self, token: &SessionToken) -> RepoResult<Option<SessionRecord>> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, SessionModel>(
                r"
                SELECT s.token, s.user_id, s.expires_at, s.created_at, u.username
                FROM sessions s
                INNER JOIN users u ON u.id = s.user_id
                WHERE s.token = ?
                ",
            )
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(result.map(SessionRecord::from))
    }

    #[instrument(skip_all)]
    async fn delete_by_token(&self, token: &SessionToken) -> RepoResult<()> {
        bounded(self.timeout, async {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token.as_str())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = bounded(self.timeout, async {
            sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
                .bind(to_millis(now))
                .execute(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await?;

        Ok(result.rows_affected())
    }
}
