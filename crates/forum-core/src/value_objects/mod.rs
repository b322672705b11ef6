//! Value objects - immutable types that represent domain concepts

mod reaction;
mod row_id;
mod session_token;

pub use reaction::{ReactionValue, TargetKind};
pub use row_id::{CommentId, PostId, RowId, RowIdParseError, UserId};
pub use session_token::SessionToken;
