//! Post service
//!
//! Creates, fetches and lists posts. Every view carries live reaction totals
//! and, for a signed-in viewer, their own reaction.

use std::collections::BTreeSet;

use forum_core::entities::{Identity, NewPost, Post, MAX_POST_BODY_LENGTH, MAX_TITLE_LENGTH};
use forum_core::traits::PostQuery;
use forum_core::{DomainError, PostId, TargetKind};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::mappers::PostWithMeta;
use crate::dto::{CreatePostRequest, ListPostsQuery, PostDetailResponse, PostFilter, PostResponse};

use super::comment::CommentService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post filed under one or more categories
    #[instrument(skip(self, identity, request), fields(user_id = %identity.user_id))]
    pub async fn create_post(
        &self,
        identity: &Identity,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        let title = request.title.trim();
        let body = request.body.trim();
        check_length("Title", title, MAX_TITLE_LENGTH)?;
        check_length("Body", body, MAX_POST_BODY_LENGTH)?;

        let slugs: Vec<String> = request
            .categories
            .iter()
            .map(|slug| slug.trim())
            .filter(|slug| !slug.is_empty())
            .map(String::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if slugs.is_empty() {
            return Err(ServiceError::validation("Choose at least one category"));
        }

        let categories = self.ctx.category_repo().find_by_slugs(&slugs).await?;
        if let Some(unknown) = slugs
            .iter()
            .find(|slug| !categories.iter().any(|c| &c.slug == *slug))
        {
            return Err(DomainError::UnknownCategory(unknown.clone()).into());
        }

        let new_post = NewPost::new(
            identity.user_id,
            title,
            body,
            categories.iter().map(|c| c.id).collect(),
        );
        let post_id = self.ctx.post_repo().create(&new_post).await?;

        info!(post_id = %post_id, "Post created");

        let post = self.find_post(post_id).await?;
        self.post_view(post, Some(identity)).await
    }

    /// One post with its comments
    #[instrument(skip(self, viewer))]
    pub async fn get_post(
        &self,
        post_id: PostId,
        viewer: Option<&Identity>,
    ) -> ServiceResult<PostDetailResponse> {
        let post = self.find_post(post_id).await?;
        let view = self.post_view(post, viewer).await?;
        let comments = CommentService::new(self.ctx)
            .comments_for(post_id, viewer)
            .await?;

        Ok(PostDetailResponse {
            post: view,
            comments,
        })
    }

    /// Posts newest first
    ///
    /// `mine` and `liked` only narrow the listing for a signed-in viewer.
    #[instrument(skip(self, viewer))]
    pub async fn list_posts(
        &self,
        query: &ListPostsQuery,
        viewer: Option<&Identity>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let viewer_id = viewer.map(|identity| identity.user_id);
        let filter = PostQuery {
            category: query
                .category
                .as_deref()
                .map(str::trim)
                .filter(|slug| !slug.is_empty())
                .map(String::from),
            author_id: viewer_id.filter(|_| query.filter == Some(PostFilter::Mine)),
            liked_by: viewer_id.filter(|_| query.filter == Some(PostFilter::Liked)),
            limit: query.limit(),
            offset: query.offset(),
        };

        let posts = self.ctx.post_repo().list(&filter).await?;

        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(self.post_view(post, viewer).await?);
        }
        Ok(views)
    }

    async fn find_post(&self, post_id: PostId) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn post_view(
        &self,
        post: Post,
        viewer: Option<&Identity>,
    ) -> ServiceResult<PostResponse> {
        let categories = self.ctx.category_repo().find_by_post(post.id).await?;

        let reactions = ReactionService::new(self.ctx);
        let counts = reactions.counts(TargetKind::Post, post.id).await?;
        let my_reaction = reactions
            .viewer_reaction(viewer, TargetKind::Post, post.id)
            .await?;

        Ok(PostResponse::from(PostWithMeta {
            post,
            categories,
            counts,
            my_reaction,
        }))
    }
}

fn check_length(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    if value.is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(ServiceError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
