//! # forum-db
//!
//! Database layer implementing repository traits with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides SQLite implementations for all repository traits
//! defined in `forum-core`. It handles:
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use forum_db::repositories::SqliteUserRepository;
//! use forum_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = SqliteUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_in_memory_pool, create_pool, ping, run_migrations, DatabaseConfig, SqlitePool,
};
pub use repositories::{
    SqliteCategoryRepository, SqliteCommentRepository, SqlitePostRepository,
    SqliteReactionRepository, SqliteSessionRepository, SqliteUserRepository,
    DEFAULT_OPERATION_TIMEOUT,
};
