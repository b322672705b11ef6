//! SQLite implementation of UserRepository

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use forum_core::entities::User;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, UserRepository};
use forum_core::value_objects::{RowId, UserId};

use crate::mappers::to_millis;
use crate::models::UserModel;

use super::error::{bounded, map_db_error, map_unique_violation};
use super::DEFAULT_OPERATION_TIMEOUT;

/// SQLite implementation of UserRepository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteUserRepository {
    /// Create a new SqliteUserRepository
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
impl UserRepository for SqliteUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, UserModel>(
                r"
                SELECT id, email, username, created_at
                FROM users
                WHERE id = ?
                ",
            )
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, UserModel>(
                r"
                SELECT id, email, username, created_at
                FROM users
                WHERE email = ?
                ",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, email: &str, username: &str, password_hash: &str) -> RepoResult<UserId> {
        let result = bounded(self.timeout, async {
            sqlx::query(
                r"
                INSERT INTO users (email, username, password_hash, created_at)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(email)
            .bind(username)
            .bind(password_hash)
            .bind(to_millis(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::DuplicateIdentity))
        })
        .await?;

        Ok(RowId::new(result.last_insert_rowid()))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        bounded(self.timeout, async {
            sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = ?")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await
    }
}
