//! Report submission boundary
//!
//! The external report-generation service behind a narrow trait, so the
//! runtime can be exercised without the network.

mod error;
mod http;

pub use error::{SubmissionError, SubmissionErrorKind};
pub use http::HttpSubmissionClient;

use crate::state_machine::AnswerSet;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Generated feasibility report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Markdown-formatted report body
    pub report_text: String,
    /// Download link, when the service produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

/// Client for the report-generation service
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Send the accumulated answers; suspends until the service replies or
    /// the attempt is abandoned.
    async fn submit(&self, answers: &AnswerSet) -> Result<Report, SubmissionError>;
}

#[async_trait]
impl<T: SubmissionClient + ?Sized> SubmissionClient for Arc<T> {
    async fn submit(&self, answers: &AnswerSet) -> Result<Report, SubmissionError> {
        (**self).submit(answers).await
    }
}
