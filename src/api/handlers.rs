//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{AnswerRequest, ErrorResponse, QueuedResponse, SessionResponse};
use super::AppState;
use crate::runtime::SessionEvent;
use crate::state_machine::{Event, Phase};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Report-generation forwarding proxy
        .route("/submit", post(submit_proxy))
        // Session snapshot
        .route("/api/session", get(get_session))
        // Presenter commands
        .route("/api/session/answer", post(answer))
        .route("/api/session/retry", post(retry))
        .route("/api/session/restart", post(restart))
        // SSE streaming
        .route("/api/session/stream", get(stream_session))
        .with_state(state)
}

// ============================================================
// Forwarding Proxy
// ============================================================

/// Forward the posted answer map verbatim to the report service, relaying
/// its status and JSON body unchanged. Any transport or parse failure on
/// either side maps to a plain 500.
async fn submit_proxy(State(state): State<AppState>, body: Bytes) -> Response {
    match forward_upstream(&state, &body).await {
        Ok((status, value)) => (status, Json(value)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error forwarding submission upstream");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}

async fn forward_upstream(state: &AppState, body: &[u8]) -> Result<(StatusCode, Value), String> {
    let payload: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;

    let response = state
        .http
        .post(&state.config.upstream_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let value = response.json::<Value>().await.map_err(|e| e.to_string())?;
    Ok((status, value))
}

// ============================================================
// Session Snapshot
// ============================================================

async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let snapshot = state.session.snapshot();
    let current_step = match snapshot.phase {
        Phase::Asking { step_index } => state.table.step_at(step_index).cloned(),
        _ => None,
    };

    Json(SessionResponse {
        state: snapshot,
        current_step,
        step_count: state.table.len(),
    })
}

// ============================================================
// Presenter Commands
// ============================================================

async fn answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state
        .session
        .dispatch(Event::AnswerSubmitted { raw: req.answer })
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(QueuedResponse { queued: true }))
}

async fn retry(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state
        .session
        .dispatch(Event::Retry)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(QueuedResponse { queued: true }))
}

async fn restart(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state
        .session
        .dispatch(Event::Restart)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(QueuedResponse { queued: true }))
}

// ============================================================
// SSE Streaming
// ============================================================

async fn stream_session(State(state): State<AppState>) -> impl IntoResponse {
    let init = SessionEvent::StateChanged {
        state: state.session.snapshot(),
    };
    sse_stream(init, state.session.subscribe())
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
