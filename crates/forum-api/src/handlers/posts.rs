//! Post handlers
//!
//! Endpoints for listing, creating and reading posts.

use axum::{extract::State, Json};
use forum_service::dto::{CreatePostRequest, ListPostsQuery, PostDetailResponse, PostResponse};
use forum_service::PostService;

use crate::extractors::{ApiPath, AuthUser, ListQuery, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List posts, newest first
///
/// GET /posts?category=&filter=mine|liked&limit=&offset=
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ListQuery(query): ListQuery<ListPostsQuery>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.list_posts(&query, viewer.identity()).await?;
    Ok(Json(posts))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(auth.identity(), request).await?;
    Ok(Created(Json(post)))
}

/// Get a post with its comments
///
/// GET /posts/:post_id
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<PostDetailResponse>> {
    let post_id = path.post_id()?;
    let service = PostService::new(state.service_context());
    let post = service.get_post(post_id, viewer.identity()).await?;
    Ok(Json(post))
}
