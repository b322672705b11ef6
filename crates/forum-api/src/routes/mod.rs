//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{routing::{get, post}, Router};

use crate::handlers::{auth, categories, comments, health, posts, reactions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(category_routes())
        .merge(post_routes())
        .merge(reaction_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// Category routes
fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(categories::list_categories))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        // Post comments
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/reactions", post(reactions::toggle_reaction))
        .route(
            "/reactions/:target_type/:target_id",
            get(reactions::reaction_summary),
        )
}
