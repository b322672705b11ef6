//! Post and comment entity <-> model mappers

use forum_core::entities::{Category, Comment, Post};
use forum_core::value_objects::RowId;

use crate::models::{CategoryModel, CommentModel, PostModel};

use super::from_millis;

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: RowId::new(model.id),
            author_id: RowId::new(model.user_id),
            author_username: model.username,
            title: model.title,
            body: model.body,
            created_at: from_millis(model.created_at),
        }
    }
}

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: RowId::new(model.id),
            post_id: RowId::new(model.post_id),
            author_id: RowId::new(model.user_id),
            author_username: model.username,
            body: model.body,
            created_at: from_millis(model.created_at),
        }
    }
}

/// Convert CategoryModel to Category entity
impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}
