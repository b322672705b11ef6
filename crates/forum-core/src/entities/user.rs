//! User entity - a registered forum account

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Registered user
///
/// The password hash is deliberately not part of the entity; it is only read
/// through `UserRepository::get_password_hash` while verifying credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The identity this user acts under once signed in
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone())
    }
}

/// Authenticated caller, as resolved from a live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}

impl Identity {
    /// Create a new Identity
    pub fn new(user_id: UserId, username: String) -> Self {
        Self { user_id, username }
    }
}
