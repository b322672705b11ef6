//! Authentication extractors
//!
//! Resolve the session cookie through the auth gate.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use forum_core::Identity;
use forum_service::AuthGate;

use super::session::SessionCookie;
use crate::response::ApiError;
use crate::state::AppState;

/// Signed-in caller; rejects the request with 401 otherwise
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let cookie = SessionCookie::from_parts(parts, app_state.cookie_name());

        let identity = AuthGate::new(app_state.service_context())
            .require_auth(cookie.token())
            .await?;

        Ok(AuthUser(identity))
    }
}

/// Optional authenticated user
///
/// Missing, unknown and expired sessions all read as anonymous.
/// Storage failures still reject the request.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Identity>);

impl OptionalAuthUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let cookie = SessionCookie::from_parts(parts, app_state.cookie_name());

        let identity = AuthGate::new(app_state.service_context())
            .identify(cookie.token())
            .await?;

        Ok(OptionalAuthUser(identity))
    }
}
