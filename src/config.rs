use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the page server listens on.
    pub port: u16,
    /// Port the debt API server listens on.
    pub api_port: u16,
    /// Base URL the pages fetch their data from.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Optional portfolio file served by the debt API.
    pub debt_data_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_port: 5000,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            debt_data_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("API Base URL: {}", config.api_base_url);
        tracing::debug!("Page Port: {}", config.port);
        tracing::debug!("API Port: {}", config.api_port);
        if let Some(ref path) = config.debt_data_path {
            tracing::info!("Debt portfolio file configured: {}", path.display());
        }

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
                None => defaults.port,
            },
            api_port: match var("API_PORT") {
                Some(port) => port.trim().parse().map_err(|_| {
                    anyhow::anyhow!("API_PORT must be a valid number between 1-65535")
                })?,
                None => defaults.api_port,
            },
            api_base_url: match var("API_BASE_URL") {
                Some(url) => validate_base_url(url.trim())?,
                None => defaults.api_base_url,
            },
            request_timeout_secs: match var("REQUEST_TIMEOUT_SECS") {
                Some(secs) => match secs.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => anyhow::bail!("REQUEST_TIMEOUT_SECS must be a positive integer"),
                },
                None => defaults.request_timeout_secs,
            },
            debt_data_path: var("DEBT_DATA_PATH").map(PathBuf::from),
        })
    }
}

fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let parsed = Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("API_BASE_URL is not a valid URL: {}", e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("API_BASE_URL must start with http:// or https://");
    }
    Ok(raw.trim_end_matches('/').to_string())
}
