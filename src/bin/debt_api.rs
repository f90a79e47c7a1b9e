use debt_pages::api_handlers::ApiState;
use debt_pages::config::Config;
use debt_pages::{obs, routes};
use std::sync::Arc;

/// Entry point for the debt API server the pages fetch from.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing();

    let config = Config::from_env()?;

    let state = Arc::new(ApiState {
        debt_data_path: config.debt_data_path.clone(),
    });
    if state.debt_data_path.is_none() {
        tracing::info!("No DEBT_DATA_PATH set, serving the sample portfolio");
    }

    let app = routes::api_router(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Debt API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
