//! Router assembly and shared handler state.

use std::time::Instant;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use rota_store::TodoService;

use crate::routes;

/// Shared state accessible from axum handlers.
///
/// The service is constructed once at startup and injected here — handlers
/// never reach for globals.
#[derive(Clone)]
pub struct AppState {
    /// Todo service facade.
    pub service: TodoService,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Create handler state around a service.
    pub fn new(service: TodoService) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router: greeting, health, and the `/api/v1/todos` surface.
pub fn build_router(state: AppState) -> Router {
    let todos = Router::new()
        .route("/", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/{id}",
            get(routes::get_todo)
                .put(routes::update_todo)
                .delete(routes::delete_todo),
        );

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .nest("/api/v1/todos", todos)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rota_store::{ConnectionConfig, new_file, run_migrations};
    use tower::ServiceExt;

    fn make_router() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        let pool = new_file(path.to_str().unwrap(), &ConnectionConfig::default()).unwrap();
        run_migrations(&pool.get().unwrap()).unwrap();
        let state = AppState::new(TodoService::new(pool));
        (dir, build_router(state))
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        let (_dir, app) = make_router();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["message"].as_str().unwrap().contains("todo API"));
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (_dir, app) = make_router();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["todos"], 0);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (_dir, app) = make_router();
        let req = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn todos_collection_route_mounted() {
        let (_dir, app) = make_router();
        let req = Request::builder()
            .uri("/api/v1/todos")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }
}
