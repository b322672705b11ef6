//! Credential store
//!
//! Registers users and verifies email/password pairs. Argon2 is deliberately
//! slow, so hashing and verification run on the blocking thread pool.

use forum_common::auth::{
    hash_password, validate_password_strength, verify_against_dummy, verify_password,
};
use forum_core::entities::User;
use forum_core::{DomainError, UserId};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Credential service
pub struct CredentialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CredentialService<'a> {
    /// Create a new CredentialService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Email and username must both be unused (exact, case-sensitive match),
    /// otherwise `DomainError::DuplicateIdentity` without saying which one.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> ServiceResult<UserId> {
        validate_password_strength(password)?;

        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user_id = self
            .ctx
            .user_repo()
            .create(email, username, &password_hash)
            .await?;

        info!(user_id = %user_id, "User registered successfully");
        Ok(user_id)
    }

    /// Check an email/password pair and return the matching user id
    pub async fn verify(&self, email: &str, password: &str) -> ServiceResult<UserId> {
        Ok(self.verify_user(email, password).await?.id)
    }

    /// Check an email/password pair and return the matching user
    ///
    /// Unknown email and wrong password fail identically, and both pay for one
    /// hash verification.
    #[instrument(skip(self, password))]
    pub async fn verify_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let password = password.to_owned();

        let Some(user) = self.ctx.user_repo().find_by_email(email).await? else {
            tokio::task::spawn_blocking(move || verify_against_dummy(&password)).await?;
            warn!("Login failed: unknown email");
            return Err(DomainError::InvalidCredentials.into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(DomainError::InvalidCredentials.into());
        };

        let is_valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await??;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(DomainError::InvalidCredentials.into());
        }

        Ok(user)
    }
}
