//! Database models - SQLx-compatible structs for SQLite tables
//!
//! Timestamp columns hold unix epoch milliseconds.

mod category;
mod comment;
mod post;
mod reaction;
mod session;
mod user;

pub use category::CategoryModel;
pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::{ReactionCountsModel, ReactionModel};
pub use session::SessionModel;
pub use user::UserModel;
