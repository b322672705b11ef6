//! User entity <-> model mapper

use forum_core::entities::User;
use forum_core::value_objects::RowId;

use crate::models::UserModel;

use super::from_millis;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: RowId::new(model.id),
            email: model.email,
            username: model.username,
            created_at: from_millis(model.created_at),
        }
    }
}
