//! Axum extractors for request handling
//!
//! Custom extractors for session authentication, validation and path/query parsing.

mod auth;
mod path;
mod query;
mod session;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{ApiPath, PostIdPath, ReactionTargetPath};
pub use query::ListQuery;
pub use session::SessionCookie;
pub use validated::ValidatedJson;
