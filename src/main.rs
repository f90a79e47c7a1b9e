use debt_pages::api_client::DebtApiClient;
use debt_pages::config::Config;
use debt_pages::handlers::AppState;
use debt_pages::{obs, routes};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

/// Entry point for the page server.
///
/// Initializes logging, loads configuration, builds the debt API client and
/// serves the debt-summary and hello pages.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing();

    let config = Config::from_env()?;

    let api_client = DebtApiClient::from_config(&config)?;
    tracing::info!("✓ Debt API client initialized: {}", api_client.base_url());

    let app_state = Arc::new(AppState { api_client });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let app = routes::pages_router(app_state).layer(GovernorLayer {
        config: governor_conf,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Page server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
