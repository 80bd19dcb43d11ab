//! HTTP surface
//!
//! The report-submission forwarding proxy plus the thin presenter-facing
//! session endpoints. Handlers only translate HTTP to commands and state
//! to JSON; no conversation logic lives here.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::config::Config;
use crate::runtime::SessionHandle;
use crate::steps::StepTable;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub table: Arc<StepTable>,
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(session: SessionHandle, table: Arc<StepTable>, config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.submit_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            session,
            table,
            http,
            config: Arc::new(config),
        }
    }
}
