//! Mock implementations for testing
//!
//! These mocks enable driving the session loop without real I/O.

use crate::state_machine::AnswerSet;
use crate::submission::{Report, SubmissionClient, SubmissionError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock submission client that returns queued outcomes
pub struct MockSubmissionClient {
    outcomes: Mutex<VecDeque<Result<Report, SubmissionError>>>,
    /// Record of all answer sets submitted
    requests: Mutex<Vec<AnswerSet>>,
}

impl MockSubmissionClient {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful outcome
    pub fn queue_report(&self, report: Report) {
        self.outcomes.lock().unwrap().push_back(Ok(report));
    }

    /// Queue a failed outcome
    pub fn queue_error(&self, error: SubmissionError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded submissions
    pub fn recorded_requests(&self) -> Vec<AnswerSet> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockSubmissionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionClient for MockSubmissionClient {
    async fn submit(&self, answers: &AnswerSet) -> Result<Report, SubmissionError> {
        self.requests.lock().unwrap().push(answers.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SubmissionError::network("No mock outcome queued")))
    }
}
