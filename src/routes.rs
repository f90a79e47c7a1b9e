use crate::api_handlers::{self, ApiState};
use crate::handlers::{self, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Per-route cap on page requests in flight, each holding one outbound fetch.
const MAX_CONCURRENT_RENDERS: usize = 256;

/// Pages only accept GETs, so bodies are capped small.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Router for the page server.
pub fn pages_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::debt_summary_page))
        .route("/hello", get(handlers::hello_page))
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .concurrency_limit(MAX_CONCURRENT_RENDERS),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router for the debt API server.
pub fn api_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/hello", get(api_handlers::hello))
        .route("/api/data", get(api_handlers::debt_data))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
