//! Comment handlers

use axum::{extract::State, Json};
use forum_service::dto::{CommentResponse, CreateCommentRequest};
use forum_service::CommentService;

use crate::extractors::{ApiPath, AuthUser, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Comments of a post, oldest first
///
/// GET /posts/:post_id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post_id = path.post_id()?;
    let service = CommentService::new(state.service_context());
    let comments = service.list_comments(post_id, viewer.identity()).await?;
    Ok(Json(comments))
}

/// Comment on a post
///
/// POST /posts/:post_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = path.post_id()?;
    let service = CommentService::new(state.service_context());
    let comment = service.add_comment(auth.identity(), post_id, request).await?;
    Ok(Created(Json(comment)))
}
