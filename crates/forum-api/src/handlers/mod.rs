//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod posts;
pub mod reactions;
