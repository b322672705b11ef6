//! SQLite implementation of PostRepository

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::instrument;

use forum_core::entities::{NewPost, Post};
use forum_core::traits::{PostQuery, PostRepository, RepoResult};
use forum_core::value_objects::{PostId, RowId};

use crate::mappers::to_millis;
use crate::models::PostModel;

use super::error::{bounded, map_db_error};
use super::DEFAULT_OPERATION_TIMEOUT;

const SELECT_POSTS: &str = r"
    SELECT p.id, p.user_id, u.username, p.title, p.body, p.created_at
    FROM posts p
    INNER JOIN users u ON u.id = p.user_id
";

/// SQLite implementation of PostRepository
#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqlitePostRepository {
    /// Create a new SqlitePostRepository
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

    async fn insert_with_categories(&self, post: &NewPost) -> RepoResult<PostId> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let id = sqlx::query(
            r"
            INSERT INTO posts (user_id, title, body, created_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(post.author_id.into_inner())
        .bind(&post.title)
        .bind(&post.body)
        .bind(to_millis(post.created_at))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .last_insert_rowid();

        for category_id in &post.category_ids {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO post_categories (post_id, category_id)
                VALUES (?, ?)
                ",
            )
            .bind(id)
            .bind(*category_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(RowId::new(id))
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let result = bounded(self.timeout, async {
            sqlx::query_as::<_, PostModel>(&format!("{SELECT_POSTS} WHERE p.id = ?"))
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_POSTS);
        builder.push(" WHERE 1 = 1");

        if let Some(slug) = &query.category {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM post_categories pc \
                     INNER JOIN categories c ON c.id = pc.category_id \
                     WHERE pc.post_id = p.id AND c.slug = ",
                )
                .push_bind(slug.clone())
                .push(")");
        }

        if let Some(author_id) = query.author_id {
            builder
                .push(" AND p.user_id = ")
                .push_bind(author_id.into_inner());
        }

        if let Some(user_id) = query.liked_by {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM reactions r \
                     WHERE r.target_type = 'post' AND r.target_id = p.id AND r.value = 1 \
                     AND r.user_id = ",
                )
                .push_bind(user_id.into_inner())
                .push(")");
        }

        builder
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let rows = bounded(self.timeout, async {
            builder
                .build_query_as::<PostModel>()
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<PostId> {
        bounded(self.timeout, self.insert_with_categories(post)).await
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: PostId) -> RepoResult<bool> {
        bounded(self.timeout, async {
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?)")
                .bind(id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)
        })
        .await
    }
}
