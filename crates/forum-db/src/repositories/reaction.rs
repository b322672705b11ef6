//! SQLite implementation of ReactionRepository

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use forum_core::entities::{Reaction, ReactionCounts, ToggleOutcome};
use forum_core::error::DomainError;
use forum_core::traits::{ReactionRepository, RepoResult};
use forum_core::value_objects::{ReactionValue, RowId, TargetKind, UserId};

use crate::mappers::to_millis;
use crate::models::{ReactionCountsModel, ReactionModel};

use super::error::{bounded, map_db_error};
use super::DEFAULT_OPERATION_TIMEOUT;

/// SQLite implementation of ReactionRepository
#[derive(Clone)]
pub struct SqliteReactionRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteReactionRepository {
    /// Create a new SqliteReactionRepository
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

    /// One toggle, as a single write transaction
    ///
    /// Every statement is a write, so the transaction takes SQLite's write lock on
    /// its first statement and concurrent toggles on the same row serialize. Each
    /// step only matches the state it handles:
    /// no row -> the insert lands; same value -> the delete lands;
    /// opposite value -> the update lands.
    async fn toggle_in_transaction(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
        value: ReactionValue,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO reactions (user_id, target_type, target_id, value, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, target_type, target_id) DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(target_kind.as_str())
        .bind(target_id.into_inner())
        .bind(value.as_i64())
        .bind(to_millis(Utc::now()))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let outcome = if inserted.rows_affected() == 1 {
            ToggleOutcome::Created
        } else {
            let removed = sqlx::query(
                r"
                DELETE FROM reactions
                WHERE user_id = ? AND target_type = ? AND target_id = ? AND value = ?
                ",
            )
            .bind(user_id.into_inner())
            .bind(target_kind.as_str())
            .bind(target_id.into_inner())
            .bind(value.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if removed.rows_affected() == 1 {
                ToggleOutcome::Removed
            } else {
                let updated = sqlx::query(
                    r"
                    UPDATE reactions
                    SET value = ?, created_at = ?
                    WHERE user_id = ? AND target_type = ? AND target_id = ? AND value <> ?
                    ",
                )
                .bind(value.as_i64())
                .bind(to_millis(Utc::now()))
                .bind(user_id.into_inner())
                .bind(target_kind.as_str())
                .bind(target_id.into_inner())
                .bind(value.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                if updated.rows_affected() != 1 {
                    return Err(DomainError::InternalError(
                        "reaction row changed during toggle".to_string(),
                    ));
                }
                ToggleOutcome::Updated
            }
        };

        tx.commit().await.map_err(map_db_error)?;
        Ok(outcome)
    }
}

#[async_trait]
impl ReactionRepository for SqliteReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
    ) -> RepoResult<Option<Reaction>> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, ReactionModel>(
                r"
                SELECT user_id, target_type, target_id, value, created_at
                FROM reactions
                WHERE user_id = ? AND target_type = ? AND target_id = ?
                ",
            )
            .bind(user_id.into_inner())
            .bind(target_kind.as_str())
            .bind(target_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn toggle(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
        value: ReactionValue,
    ) -> RepoResult<ToggleOutcome> {
        let outcome = bounded(
            self.timeout,
            self.toggle_in_transaction(user_id, target_kind, target_id, value),
        )
        .await?;

        debug!(?outcome, "Reaction toggled");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn counts(
        &self,
        target_kind: TargetKind,
        target_id: RowId,
    ) -> RepoResult<ReactionCounts> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, ReactionCountsModel>(
                r"
                SELECT
                    COALESCE(SUM(CASE WHEN value = 1 THEN 1 ELSE 0 END), 0) AS like_count,
                    COALESCE(SUM(CASE WHEN value = -1 THEN 1 ELSE 0 END), 0) AS dislike_count
                FROM reactions
                WHERE target_type = ? AND target_id = ?
                ",
            )
            .bind(target_kind.as_str())
            .bind(target_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(ReactionCounts::from(result))
    }
}
