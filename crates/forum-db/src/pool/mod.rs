//! Database connection pool management

mod sqlite;

pub use sqlite::{
    create_in_memory_pool, create_pool, ping, run_migrations, DatabaseConfig, MIGRATOR,
};

// Re-export SqlitePool for convenience
pub use sqlx::sqlite::SqlitePool;
