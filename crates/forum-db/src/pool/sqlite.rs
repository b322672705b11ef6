//! SQLite connection pool management

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database configuration for connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://data/forum.db`
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Maximum time to wait for a pooled connection
    pub acquire_timeout: Duration,
    /// How long SQLite retries a locked database before returning SQLITE_BUSY
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://data/forum.db"),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&forum_common::DatabaseConfig> for DatabaseConfig {
    fn from(config: &forum_common::DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections.max(1),
            acquire_timeout: config.operation_timeout(),
            busy_timeout: config.busy_timeout(),
        }
    }
}

/// Create a new SQLite connection pool
///
/// The database file (and its directory) are created if missing. Every
/// connection runs in WAL mode with foreign keys enforced.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout);

    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir).await?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// Create a private in-memory database on a single long-lived connection
///
/// Each SQLite `:memory:` connection is its own database, so the pool is pinned
/// to one connection that is never recycled.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply any pending schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    info!("Running database migrations...");
    MIGRATOR.run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}

/// Round-trip a trivial query to prove the database answers
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_app_config() {
        let app = forum_common::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 0,
            busy_timeout_secs: 2,
            operation_timeout_secs: 3,
        };
        let config = DatabaseConfig::from(&app);
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.busy_timeout, Duration::from_secs(2));
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_in_memory_pool_migrates() {
        let pool = create_in_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master \
             WHERE type = 'table' AND name IN ('users', 'sessions', 'reactions')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 3);

        // Running again is a no-op
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_fails_after_close() {
        let pool = create_in_memory_pool().await.unwrap();
        ping(&pool).await.unwrap();

        pool.close().await;
        assert!(ping(&pool).await.is_err());
    }
}
