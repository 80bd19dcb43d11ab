//! Submission error types

use thiserror::Error;

/// Submission failure.
///
/// Every kind lands the session in the same retryable `Failed` phase; the
/// classification exists for log fidelity, never for branching.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SubmissionError {
    pub kind: SubmissionErrorKind,
    pub message: String,
}

impl SubmissionError {
    pub fn new(kind: SubmissionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SubmissionErrorKind::Network, message)
    }

    pub fn upstream_status(status: u16) -> Self {
        Self::new(
            SubmissionErrorKind::UpstreamStatus,
            format!("report service returned status {status}"),
        )
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SubmissionErrorKind::InvalidResponse, message)
    }
}

/// Failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionErrorKind {
    /// Transport failure or timeout
    Network,
    /// Upstream replied with a non-success status
    UpstreamStatus,
    /// Upstream body did not match the expected shape
    InvalidResponse,
}
