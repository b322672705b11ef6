//! Error handling utilities for repositories

use std::future::Future;
use std::time::Duration;

use forum_core::error::DomainError;
use forum_core::traits::RepoResult;
use sqlx::Error as SqlxError;

/// SQLITE_BUSY primary result code
const SQLITE_BUSY: i32 = 5;

/// SQLITE_LOCKED primary result code
const SQLITE_LOCKED: i32 = 6;

/// Convert SQLx error to DomainError
///
/// Lock contention and pool exhaustion are retryable and map to
/// `DomainError::Transient`; everything else is a hard database error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if is_transient(&e) {
        return DomainError::Transient(e.to_string());
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

fn is_transient(e: &SqlxError) -> bool {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => true,
        SqlxError::Database(db_err) => db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            // Extended codes carry the primary code in the low byte
            .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED)),
        _ => false,
    }
}

/// Run a storage operation under a deadline
///
/// An operation that does not finish in `limit` is abandoned and reported as
/// `DomainError::Transient`. Dropping the future rolls back any open transaction.
pub async fn bounded<T, F>(limit: Duration, operation: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, operation).await.map_err(|_| {
        DomainError::Transient(format!(
            "storage operation timed out after {}ms",
            limit.as_millis()
        ))
    })?
}
