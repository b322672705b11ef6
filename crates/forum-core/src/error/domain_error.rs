//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RowId, TargetKind};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(RowId),

    #[error("Unknown {kind}: {id}")]
    TargetNotFound { kind: TargetKind, id: RowId },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Reaction value must be 1 or -1, got {0}")]
    InvalidReactionValue(i64),

    #[error("Unknown reaction target type: {0}")]
    InvalidTargetKind(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email or username already taken")]
    DuplicateIdentity,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage temporarily unavailable: {0}")]
    Transient(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::TargetNotFound { .. } => "UNKNOWN_TARGET",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionValue(_) => "INVALID_REACTION_VALUE",
            Self::InvalidTargetKind(_) => "INVALID_TARGET_TYPE",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",

            // Authentication
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",

            // Conflict
            Self::DuplicateIdentity => "DUPLICATE_IDENTITY",

            // Infrastructure
            Self::Transient(_) => "SERVICE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::TargetNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidReactionValue(_)
                | Self::InvalidTargetKind(_)
                | Self::UnknownCategory(_)
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Unauthenticated)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateIdentity)
    }

    /// Check if the storage layer was temporarily unreachable
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authentication() {
            401
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else if self.is_transient() {
            503
        } else {
            500
        }
    }
}
