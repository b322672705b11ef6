//! Reaction handlers
//!
//! Like/dislike toggling and per-target totals.

use axum::{extract::State, Json};
use forum_service::dto::{ReactionSummaryResponse, ToggleReactionRequest, ToggleReactionResponse};
use forum_service::ReactionService;

use crate::extractors::{ApiPath, AuthUser, OptionalAuthUser, ReactionTargetPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle the caller's reaction on a post or comment
///
/// POST /reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ToggleReactionRequest>,
) -> ApiResult<Json<ToggleReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service.toggle_request(auth.identity(), request).await?;
    Ok(Json(response))
}

/// Totals for one target, plus the caller's own reaction when signed in
///
/// GET /reactions/:target_type/:target_id
pub async fn reaction_summary(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<ReactionTargetPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let target_id = path.target_id()?;
    let service = ReactionService::new(state.service_context());
    let summary = service
        .summary(&path.target_type, target_id.into_inner(), viewer.identity())
        .await?;
    Ok(Json(summary))
}
