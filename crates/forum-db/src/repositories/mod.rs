//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in forum-core.
//! Each repository handles database operations for a specific domain entity,
//! and every call is bounded by the repository's operation timeout.

use std::time::Duration;

mod category;
mod comment;
mod error;
mod post;
mod reaction;
mod session;
mod user;

pub use category::SqliteCategoryRepository;
pub use comment::SqliteCommentRepository;
pub use error::{bounded, map_db_error, map_unique_violation};
pub use post::SqlitePostRepository;
pub use reaction::SqliteReactionRepository;
pub use session::SqliteSessionRepository;
pub use user::SqliteUserRepository;

/// Deadline applied to each repository call unless overridden with `with_timeout`
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);
