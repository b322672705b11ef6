//! Session cookie extractor
//!
//! Reads the raw session token from the configured cookie without resolving it.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use forum_core::SessionToken;

use crate::state::AppState;

/// Session token presented by the client, if any
#[derive(Debug, Clone)]
pub struct SessionCookie(pub Option<SessionToken>);

impl SessionCookie {
    /// Pull the token out of a cookie jar
    pub fn from_jar(jar: &CookieJar, cookie_name: &str) -> Self {
        let token = jar
            .get(cookie_name)
            .map(|cookie| cookie.value().trim())
            .filter(|value| !value.is_empty())
            .map(SessionToken::from_raw);
        Self(token)
    }

    /// Token carried by the request headers
    pub fn from_parts(parts: &Parts, cookie_name: &str) -> Self {
        Self::from_jar(&CookieJar::from_headers(&parts.headers), cookie_name)
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(Self::from_parts(parts, app_state.cookie_name()))
    }
}
