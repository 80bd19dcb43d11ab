//! Environment configuration

use std::time::Duration;

const DEFAULT_UPSTREAM_URL: &str = "https://msme-flask-production.up.railway.app/submit";

/// Service configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Report-generation endpoint the answers are submitted to
    pub upstream_url: String,
    /// Request timeout for submissions and the forwarding proxy
    pub submit_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("ADVISOR_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let upstream_url = std::env::var("ADVISOR_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let submit_timeout = std::env::var("ADVISOR_SUBMIT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(300));

        Self {
            port,
            upstream_url,
            submit_timeout,
        }
    }
}
