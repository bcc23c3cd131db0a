use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context};
use axum::http::HeaderValue;

/// Where latest prices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataSource {
    Yahoo,
    /// Reads succeed with zeroed market fields.
    Off,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// `None` allows any origin.
    pub cors_allow_origins: Option<Vec<HeaderValue>>,
    pub request_timeout: Duration,
    pub market_data: MarketDataSource,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr = env_or("LF_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("LF_LISTEN_ADDR must be a socket address")?;
        let db_path = env_or("LF_DB_PATH", "./db/app.db");
        let cors_allow_origins = parse_origins(&env_or("LF_CORS_ALLOW_ORIGINS", "*"))?;
        let timeout_ms: u64 = env_or("LF_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("LF_REQUEST_TIMEOUT_MS must be a number of milliseconds")?;
        let market_data = parse_market_data(&env_or("LF_MARKET_DATA", "yahoo"))?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow_origins,
            request_timeout: Duration::from_millis(timeout_ms),
            market_data,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> anyhow::Result<Option<Vec<HeaderValue>>> {
    if raw.trim() == "*" {
        return Ok(None);
    }
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map(Some)
}

fn parse_market_data(raw: &str) -> anyhow::Result<MarketDataSource> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yahoo" => Ok(MarketDataSource::Yahoo),
        "off" | "none" => Ok(MarketDataSource::Off),
        other => bail!("LF_MARKET_DATA must be 'yahoo' or 'off', got '{}'", other),
    }
}
