//! Session entity <-> model mapper

use forum_core::entities::Session;
use forum_core::traits::SessionRecord;
use forum_core::value_objects::{RowId, SessionToken};

use crate::models::SessionModel;

use super::from_millis;

/// Convert a joined session row to a SessionRecord
impl From<SessionModel> for SessionRecord {
    fn from(model: SessionModel) -> Self {
        SessionRecord {
            session: Session {
                token: SessionToken::from_raw(model.token),
                user_id: RowId::new(model.user_id),
                expires_at: from_millis(model.expires_at),
                created_at: from_millis(model.created_at),
            },
            username: model.username,
        }
    }
}
