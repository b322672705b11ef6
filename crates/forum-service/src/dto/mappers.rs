//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs. Views
//! that need live reaction totals take them alongside the entity.

use forum_core::entities::{Category, Comment, Post, ReactionCounts, User};
use forum_core::ReactionValue;

use super::responses::{
    AuthorResponse, CategoryResponse, CommentResponse, CurrentUserResponse, PostResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

// ============================================================================
// Post / Comment Mappers
// ============================================================================

/// A post plus everything needed to render it
#[derive(Debug, Clone)]
pub struct PostWithMeta {
    pub post: Post,
    pub categories: Vec<Category>,
    pub counts: ReactionCounts,
    pub my_reaction: Option<ReactionValue>,
}

impl From<PostWithMeta> for PostResponse {
    fn from(meta: PostWithMeta) -> Self {
        let PostWithMeta {
            post,
            categories,
            counts,
            my_reaction,
        } = meta;

        Self {
            id: post.id,
            author: AuthorResponse {
                id: post.author_id,
                username: post.author_username,
            },
            title: post.title,
            body: post.body,
            categories: categories.into_iter().map(CategoryResponse::from).collect(),
            like_count: counts.like_count,
            dislike_count: counts.dislike_count,
            my_reaction,
            created_at: post.created_at,
        }
    }
}

/// A comment plus its live reaction totals
#[derive(Debug, Clone)]
pub struct CommentWithMeta {
    pub comment: Comment,
    pub counts: ReactionCounts,
    pub my_reaction: Option<ReactionValue>,
}

impl From<CommentWithMeta> for CommentResponse {
    fn from(meta: CommentWithMeta) -> Self {
        let CommentWithMeta {
            comment,
            counts,
            my_reaction,
        } = meta;

        Self {
            id: comment.id,
            post_id: comment.post_id,
            author: AuthorResponse {
                id: comment.author_id,
                username: comment.author_username,
            },
            body: comment.body,
            like_count: counts.like_count,
            dislike_count: counts.dislike_count,
            my_reaction,
            created_at: comment.created_at,
        }
    }
}
