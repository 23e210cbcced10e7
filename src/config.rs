//! Environment-driven configuration.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_FILE: &str = ".delivery-session.json";
pub const DEFAULT_MOCK_BACKEND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` leaves reqwest's default behaviour in place.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBackendConfig {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub mock_backend: MockBackendConfig,
}

/// Reads configuration from the process environment.
pub fn load() -> Result<AppConfig> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Builds configuration from an arbitrary key lookup.
pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = lookup("DELIVERY_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let timeout = lookup("DELIVERY_HTTP_TIMEOUT_SECS")
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("DELIVERY_HTTP_TIMEOUT_SECS is not a number: {raw}"))
        })
        .transpose()?
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let session_path = lookup("DELIVERY_SESSION_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

    let addr_raw =
        lookup("MOCK_BACKEND_ADDR").unwrap_or_else(|| DEFAULT_MOCK_BACKEND_ADDR.to_string());
    let addr = addr_raw
        .parse::<SocketAddr>()
        .with_context(|| format!("MOCK_BACKEND_ADDR is not a socket address: {addr_raw}"))?;

    Ok(AppConfig {
        api: ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        },
        session: SessionConfig { path: session_path },
        mock_backend: MockBackendConfig { addr },
    })
}
