//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (tracing, body limit)
//! and creates the axum router ready for serving.
//!
//! Methods not registered on a known path get axum's empty 405; unknown
//! paths get its empty 404.

use axum::{
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

use super::handlers;
use super::state::AppState;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %Uuid::new_v4(),
        )
    });

    Router::new()
        .route("/health", get(handlers::health_check))
        // Questions
        .route(
            "/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route(
            "/questions/",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route(
            "/questions/{id}",
            get(handlers::get_question).delete(handlers::delete_question),
        )
        .route("/questions/{id}/answers", post(handlers::create_answer))
        // Answers
        .route(
            "/answers/{id}",
            get(handlers::get_answer).delete(handlers::delete_answer),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(trace)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use axum::{body::Body, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(AppState::new(Arc::new(LocalRepository::new())))
    }

    async fn status_of(method: &str, uri: &str) -> StatusCode {
        router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_route_table() {
        assert_eq!(status_of("GET", "/health").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/questions").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/questions/").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/questions/1").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("GET", "/answers/1").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_methods() {
        assert_eq!(
            status_of("PUT", "/questions").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_of("PATCH", "/questions/1").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_of("GET", "/questions/1/answers").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_of("POST", "/answers/1").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_of("POST", "/health").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[tokio::test]
    async fn test_preflight_is_not_answered() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/questions")
                    .header("origin", "http://elsewhere.example")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_paths() {
        assert_eq!(status_of("GET", "/").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("GET", "/answers").await, StatusCode::NOT_FOUND);
        assert_eq!(
            status_of("GET", "/questions/1/answers/2").await,
            StatusCode::NOT_FOUND
        );
    }
}
