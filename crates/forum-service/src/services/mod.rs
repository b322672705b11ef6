//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod category;
pub mod comment;
pub mod context;
pub mod credential;
pub mod error;
pub mod gate;
pub mod post;
pub mod reaction;
pub mod session;

// Re-export all services for convenience
pub use auth::{AuthService, LoginOutcome};
pub use category::CategoryService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use credential::CredentialService;
pub use error::{ServiceError, ServiceResult};
pub use gate::AuthGate;
pub use post::PostService;
pub use reaction::ReactionService;
pub use session::SessionService;
