use crate::api_client::DebtApiClient;
use crate::errors::{AppError, ResultExt};
use crate::pages;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "debt-pages";

/// Shared state injected into the page handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the debt API. Holds no response data between renders.
    pub api_client: DebtApiClient,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

fn html_page(title: &str, fragment: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        pages::document(title, fragment),
    )
        .into_response()
}

/// GET /
///
/// Renders the debt-summary page from a fresh `/api/data` fetch.
pub async fn debt_summary_page(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    tracing::info!("GET / - rendering debt summary");

    let fragment = pages::render_debt_summary(&state.api_client)
        .await
        .context("Rendering debt summary page")?;

    Ok(html_page("Debt Payoff Summary", &fragment))
}

/// GET /hello
///
/// Renders the hello page from a fresh `/api/hello` fetch.
pub async fn hello_page(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    tracing::info!("GET /hello - rendering greeting");

    let fragment = pages::render_hello(&state.api_client)
        .await
        .context("Rendering hello page")?;

    Ok(html_page("Hello", &fragment))
}
