//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

mod reaper;

use std::future::Future;

use axum::Router;
use forum_common::{AppConfig, AppError};
use forum_db::{create_pool, run_migrations};
use forum_service::{CategoryService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

pub use reaper::spawn_session_reaper;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Open the database, apply migrations, seed categories and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(url = %config.database.url, "Opening SQLite database...");
    let db_config = forum_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("SQLite database ready");

    let service_context = ServiceContextBuilder::new()
        .sqlite_repositories(pool, config.database.operation_timeout())
        .session_ttl(config.session.ttl())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let seeded = CategoryService::new(&service_context)
        .seed_defaults()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    if seeded > 0 {
        info!(count = seeded, "Seeded default categories");
    }

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until `shutdown` resolves
pub async fn run_server<F>(app: Router, addr: &str, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(local) = listener.local_addr() {
        info!("Server listening on http://{}", local);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let reaper_interval = config.session.reaper_interval();

    let state = create_app_state(config).await?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let reaper = reaper_interval.map(|period| spawn_session_reaper(state.clone(), period, stop_rx));

    let app = create_app(state);
    let result = run_server(app, &addr, shutdown_signal()).await;

    let _ = stop_tx.send(true);
    if let Some(handle) = reaper {
        let _ = handle.await;
    }

    result
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_routes() {
        let app = create_app(test_state().await);

        let (status, body) = send(
            app.clone(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(
            app,
            Request::get("/health/ready").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["database"], "healthy");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let app = create_app(test_state().await);
        let response = app
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-123");
    }

    #[tokio::test]
    async fn test_protected_route_requires_session() {
        let app = create_app(test_state().await);

        let (status, body) = send(
            app.clone(),
            Request::get("/api/v1/auth/me").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");

        let (status, _) = send(
            app,
            Request::get("/api/v1/auth/me")
                .header(header::COOKIE, "forum_session=not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = create_app(test_state().await);
        let (status, body) = send(
            app,
            Request::post("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"email\": "))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_categories_are_listed() {
        let app = create_app(test_state().await);
        let (status, body) = send(
            app,
            Request::get("/api/v1/categories").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.as_array().unwrap().is_empty());
    }
}
