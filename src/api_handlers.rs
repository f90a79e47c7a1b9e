//! Handlers for the debt API the pages read from.

use crate::errors::AppError;
use crate::models::HelloResponse;
use crate::portfolio::Portfolio;
use crate::simulator::{
    generate_summary, DebtSimulator, DebtSummary, PaymentDetail, RepaymentMethod, ScheduleEntry,
    DEFAULT_MAX_MONTHS,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub const HELLO_MESSAGE: &str = "Hello World!";

#[derive(Clone, Default)]
pub struct ApiState {
    /// Portfolio file read on every request; the sample is used when unset.
    pub debt_data_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct DataQueryParams {
    pub method: Option<String>,
}

/// Body of `GET /api/data`.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub summary: DebtSummary,
    pub schedule: Vec<ScheduleEntry>,
    pub payments: Vec<PaymentDetail>,
}

/// GET /api/hello
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: HELLO_MESSAGE.to_string(),
    })
}

/// GET /api/data
///
/// Runs the repayment simulation over the current portfolio.
///
/// # Arguments
///
/// * `params` - Optional `method` (`avalanche` or `snowball`, default `avalanche`).
pub async fn debt_data(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<DataQueryParams>,
) -> Result<Json<DataResponse>, AppError> {
    let method = match params.method.as_deref() {
        Some(raw) => raw.parse::<RepaymentMethod>().map_err(AppError::BadRequest)?,
        None => RepaymentMethod::default(),
    };
    tracing::info!("GET /api/data - method: {}", method);

    let portfolio = Portfolio::load_or_sample(state.debt_data_path.as_deref()).await?;
    let simulator = DebtSimulator::new(portfolio);
    let simulation = simulator.run_simulation(method, DEFAULT_MAX_MONTHS);

    let summary = generate_summary(&simulation.schedule, method).ok_or_else(|| {
        AppError::InternalError("Simulation produced an empty schedule".to_string())
    })?;

    tracing::info!(
        "Simulated {} repayment: {} months, {:.2} paid",
        method,
        summary.total_months,
        summary.total_amount_paid
    );

    Ok(Json(DataResponse {
        summary,
        schedule: simulation.schedule,
        payments: simulation.payments,
    }))
}
