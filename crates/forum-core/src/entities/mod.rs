//! Domain entities - core business objects

mod category;
mod comment;
mod post;
mod reaction;
mod session;
mod user;

pub use category::{Category, DEFAULT_CATEGORIES};
pub use comment::{Comment, MAX_COMMENT_LENGTH};
pub use post::{NewPost, Post, MAX_POST_BODY_LENGTH, MAX_TITLE_LENGTH};
pub use reaction::{Reaction, ReactionCounts, ToggleOutcome};
pub use session::{Session, MAX_SESSION_TTL_SECS};
pub use user::{Identity, User};
