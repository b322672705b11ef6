//! Category service

use tracing::instrument;

use crate::dto::CategoryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories, ordered by name
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    /// Insert the default categories into an empty table
    pub async fn seed_defaults(&self) -> ServiceResult<u64> {
        Ok(self.ctx.category_repo().seed_defaults().await?)
    }
}
