//! Session entity - the single live login of a user

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::{SessionToken, UserId};

/// Longest lifetime a session may be issued with (ten years)
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// A login session
///
/// At most one session exists per user. Creating a new one replaces the old
/// row, which invalidates the previous token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Issue a new session for `user_id` that lives for `ttl` from `now`
    ///
    /// Timestamps are truncated to whole milliseconds, the precision they are
    /// stored with, so the returned expiry is exactly what a later read sees.
    ///
    /// # Errors
    /// Returns `DomainError::InternalError` if the expiry does not fit in a
    /// `DateTime<Utc>`
    pub fn issue(user_id: UserId, ttl: Duration, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let now = truncate_to_millis(now);
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            DomainError::InternalError(format!("session lifetime {ttl} overflows"))
        })?;

        Ok(Self {
            token: SessionToken::generate(),
            user_id,
            expires_at,
            created_at: now,
        })
    }

    /// The lifetime cap as a `Duration`
    pub fn max_ttl() -> Duration {
        Duration::seconds(MAX_SESSION_TTL_SECS)
    }

    /// A session is dead from its expiry instant onward
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}
