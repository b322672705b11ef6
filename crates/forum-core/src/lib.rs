//! # forum-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Category, Comment, Identity, NewPost, Post, Reaction, ReactionCounts, Session, ToggleOutcome,
    User, DEFAULT_CATEGORIES,
};
pub use error::DomainError;
pub use traits::{
    CategoryRepository, CommentRepository, PostQuery, PostRepository, ReactionRepository,
    RepoResult, SessionRecord, SessionRepository, UserRepository,
};
pub use value_objects::{
    CommentId, PostId, ReactionValue, RowId, RowIdParseError, SessionToken, TargetKind, UserId,
};
