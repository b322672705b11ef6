//! Comment service

use forum_core::entities::{Comment, Identity, MAX_COMMENT_LENGTH};
use forum_core::{DomainError, PostId, TargetKind};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::mappers::CommentWithMeta;
use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment under a post
    #[instrument(skip(self, identity, request), fields(user_id = %identity.user_id))]
    pub async fn add_comment(
        &self,
        identity: &Identity,
        post_id: PostId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let body = request.body.trim();
        if body.is_empty() {
            return Err(ServiceError::validation("Comment must not be empty"));
        }
        if body.chars().count() > MAX_COMMENT_LENGTH {
            return Err(ServiceError::validation(format!(
                "Comment must be at most {MAX_COMMENT_LENGTH} characters"
            )));
        }

        self.ensure_post_exists(post_id).await?;

        let comment_id = self
            .ctx
            .comment_repo()
            .create(post_id, identity.user_id, body)
            .await?;

        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        info!(comment_id = %comment_id, post_id = %post_id, "Comment added");

        self.comment_view(comment, Some(identity)).await
    }

    /// Comments of a post, oldest first
    #[instrument(skip(self, viewer))]
    pub async fn list_comments(
        &self,
        post_id: PostId,
        viewer: Option<&Identity>,
    ) -> ServiceResult<Vec<CommentResponse>> {
        self.ensure_post_exists(post_id).await?;
        self.comments_for(post_id, viewer).await
    }

    /// Comments of a post already known to exist
    pub(crate) async fn comments_for(
        &self,
        post_id: PostId,
        viewer: Option<&Identity>,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            views.push(self.comment_view(comment, viewer).await?);
        }
        Ok(views)
    }

    async fn comment_view(
        &self,
        comment: Comment,
        viewer: Option<&Identity>,
    ) -> ServiceResult<CommentResponse> {
        let reactions = ReactionService::new(self.ctx);
        let counts = reactions.counts(TargetKind::Comment, comment.id).await?;
        let my_reaction = reactions
            .viewer_reaction(viewer, TargetKind::Comment, comment.id)
            .await?;

        Ok(CommentResponse::from(CommentWithMeta {
            comment,
            counts,
            my_reaction,
        }))
    }

    async fn ensure_post_exists(&self, post_id: PostId) -> ServiceResult<()> {
        if self.ctx.post_repo().exists(post_id).await? {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(post_id).into())
        }
    }
}
