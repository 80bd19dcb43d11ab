//! MSME business-intake advisor
//!
//! A Rust backend implementing the conversation state machine that walks a
//! prospective business owner through the advisory questionnaire and
//! submits the completed answers for feasibility-report generation.

mod api;
mod config;
mod runtime;
mod state_machine;
mod steps;
mod submission;
mod validation;

use api::{create_router, AppState};
use config::Config;
use runtime::spawn_session;
use std::net::SocketAddr;
use std::sync::Arc;
use steps::StepTable;
use submission::HttpSubmissionClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msme_advisor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();
    let table = Arc::new(StepTable::standard());

    let client = HttpSubmissionClient::new(config.upstream_url.clone(), config.submit_timeout);
    let session = spawn_session(Arc::clone(&table), client);
    tracing::info!(
        steps = table.len(),
        upstream = %config.upstream_url,
        "Session started"
    );

    let port = config.port;
    let state = AppState::new(session, table, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Advisor server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
