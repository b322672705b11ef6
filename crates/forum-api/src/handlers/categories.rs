//! Category handlers

use axum::{extract::State, Json};
use forum_service::dto::CategoryResponse;
use forum_service::CategoryService;

use crate::response::ApiResult;
use crate::state::AppState;

/// All categories by name
///
/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}
