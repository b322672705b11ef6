//! Authentication service
//!
//! Handles registration, login, logout and the current-user lookup on top of
//! the credential store and session manager.

use chrono::{DateTime, Utc};
use forum_core::entities::Identity;
use forum_core::SessionToken;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest};

use super::context::ServiceContext;
use super::credential::CredentialService;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// A successful login: the new session token and the signed-in user
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: CurrentUserResponse,
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

impl LoginOutcome {
    /// Body returned to the client; the token itself travels in the cookie
    pub fn response(&self) -> LoginResponse {
        LoginResponse {
            user: self.user.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let user_id = CredentialService::new(self.ctx)
            .register(&request.email, &request.username, &request.password)
            .await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(user))
    }

    /// Login with email and password
    ///
    /// Any session the user already had is replaced.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginOutcome> {
        request.validate()?;

        let user = CredentialService::new(self.ctx)
            .verify_user(&request.email, &request.password)
            .await?;

        let session = SessionService::new(self.ctx).create_session(user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginOutcome {
            user: CurrentUserResponse::from(user),
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Logout by revoking the presented token, if any
    #[instrument(skip_all)]
    pub async fn logout(&self, token: Option<&SessionToken>) -> ServiceResult<()> {
        if let Some(token) = token {
            SessionService::new(self.ctx).revoke(token).await?;
            info!("User logged out");
        }
        Ok(())
    }

    /// Profile of the signed-in user
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn me(&self, identity: &Identity) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", identity.user_id.to_string()))?;

        Ok(CurrentUserResponse::from(user))
    }
}
