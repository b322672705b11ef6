//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CategoryRepository, CommentRepository, PostQuery, PostRepository, ReactionRepository,
    RepoResult, SessionRecord, SessionRepository, UserRepository,
};
