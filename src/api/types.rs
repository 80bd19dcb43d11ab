//! API request and response types

use crate::state_machine::ConversationState;
use crate::steps::Step;
use serde::{Deserialize, Serialize};

/// Request to answer the active question
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Acknowledgement for a dispatched command
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Session snapshot for presenters
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub state: ConversationState,
    /// The question currently awaiting an answer, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<Step>,
    pub step_count: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
