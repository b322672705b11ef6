//! Session manager
//!
//! Issues, resolves and revokes session tokens. Each user holds at most one
//! session; issuing a new one replaces the old row and kills its token.
//! Expired sessions are removed lazily by `resolve` and in bulk by
//! `purge_expired`.

use chrono::{DateTime, Duration, Utc};
use forum_core::entities::{Identity, Session};
use forum_core::{SessionToken, UserId};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a session with the configured lifetime
    pub async fn create_session(&self, user_id: UserId) -> ServiceResult<Session> {
        self.create_session_with_ttl(user_id, self.ctx.session_ttl()).await
    }

    /// Issue a session that expires `ttl` from now, replacing any existing one
    #[instrument(skip(self))]
    pub async fn create_session_with_ttl(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> ServiceResult<Session> {
        let session = Session::issue(user_id, ttl, Utc::now())?;
        self.ctx.session_repo().upsert(&session).await?;

        info!(user_id = %user_id, expires_at = %session.expires_at, "Session created");
        Ok(session)
    }

    /// Resolve a token to the identity it is bound to, as of now
    pub async fn resolve(&self, token: &SessionToken) -> ServiceResult<Option<Identity>> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolve a token as of `now`
    ///
    /// A session whose expiry is at or before `now` is deleted and reported absent.
    #[instrument(skip_all)]
    pub async fn resolve_at(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> ServiceResult<Option<Identity>> {
        let Some(record) = self.ctx.session_repo().find_by_token(token).await? else {
            debug!("Unknown session token");
            return Ok(None);
        };

        if record.session.is_expired_at(now) {
            self.ctx.session_repo().delete_by_token(token).await?;
            info!(user_id = %record.session.user_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(Identity::new(record.session.user_id, record.username)))
    }

    /// Delete the session behind `token`; a no-op if there is none
    #[instrument(skip_all)]
    pub async fn revoke(&self, token: &SessionToken) -> ServiceResult<()> {
        self.ctx.session_repo().delete_by_token(token).await?;
        Ok(())
    }

    /// Delete every session that has expired by `now`
    #[instrument(skip(self))]
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> ServiceResult<u64> {
        Ok(self.ctx.session_repo().delete_expired(now).await?)
    }
}
