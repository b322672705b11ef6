//! # forum-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthGate, AuthService, CategoryService, CommentService, CredentialService, LoginOutcome,
    PostService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SessionService,
};
