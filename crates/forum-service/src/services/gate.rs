//! Auth gate
//!
//! Turns the session token carried by a request into the caller's identity.

use forum_core::entities::Identity;
use forum_core::SessionToken;
use tracing::warn;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// Guard in front of every mutation
pub struct AuthGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthGate<'a> {
    /// Create a new AuthGate
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the token or fail with `Unauthenticated`
    ///
    /// Storage failures are passed through unchanged, so an outage reads as
    /// 503 rather than as a logged-out caller.
    pub async fn require_auth(&self, token: Option<&SessionToken>) -> ServiceResult<Identity> {
        self.identify(token)
            .await?
            .ok_or_else(ServiceError::unauthenticated)
    }

    /// Resolve the token if there is one; anonymous callers get `None`
    pub async fn identify(&self, token: Option<&SessionToken>) -> ServiceResult<Option<Identity>> {
        let Some(token) = token else {
            return Ok(None);
        };

        let identity = SessionService::new(self.ctx).resolve(token).await?;
        if identity.is_none() {
            warn!("Rejected unknown or expired session token");
        }
        Ok(identity)
    }
}
