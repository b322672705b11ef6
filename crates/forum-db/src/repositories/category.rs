//! SQLite implementation of CategoryRepository

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{info, instrument};

use forum_core::entities::{Category, DEFAULT_CATEGORIES};
use forum_core::traits::{CategoryRepository, RepoResult};
use forum_core::value_objects::PostId;

use crate::models::CategoryModel;

use super::error::{bounded, map_db_error};
use super::DEFAULT_OPERATION_TIMEOUT;

/// SQLite implementation of CategoryRepository
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteCategoryRepository {
    /// Create a new SqliteCategoryRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the per-call deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn seed_if_empty(&self) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if existing > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for (name, slug) in DEFAULT_CATEGORIES {
            inserted += sqlx::query("INSERT OR IGNORE INTO categories (name, slug) VALUES (?, ?)")
                .bind(*name)
                .bind(*slug)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?
                .rows_affected();
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(inserted)
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let rows = bounded(self.timeout, async {
            sqlx::query_as::<_, CategoryModel>(
                "SELECT id, name, slug FROM categories ORDER BY name",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_slugs(&self, slugs: &[String]) -> RepoResult<Vec<Category>> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT id, name, slug FROM categories WHERE slug IN (");
        let mut separated = builder.separated(", ");
        for slug in slugs {
            separated.push_bind(slug.clone());
        }
        separated.push_unseparated(") ORDER BY name");

        let rows = bounded(self.timeout, async {
            builder
                .build_query_as::<CategoryModel>()
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Category>> {
        let rows = bounded(self.timeout, async {
            sqlx::query_as::<_, CategoryModel>(
                r"
                SELECT c.id, c.name, c.slug
                FROM categories c
                INNER JOIN post_categories pc ON pc.category_id = c.id
                WHERE pc.post_id = ?
                ORDER BY c.name
                ",
            )
            .bind(post_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
        })
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn seed_defaults(&self) -> RepoResult<u64> {
        let inserted = bounded(self.timeout, self.seed_if_empty()).await?;
        if inserted > 0 {
            info!(inserted, "Seeded default categories");
        }
        Ok(inserted)
    }
}
