//! reqwest-backed submission client

use super::{Report, SubmissionClient, SubmissionError};
use crate::state_machine::AnswerSet;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Wire shape of the upstream reply
#[derive(Debug, Deserialize)]
struct UpstreamReport {
    response: String,
    #[serde(default)]
    pdf_url: String,
}

/// Production client posting the answer map to the report endpoint
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn normalize(report: UpstreamReport) -> Report {
        let report_url = if report.pdf_url.is_empty() {
            None
        } else {
            Some(report.pdf_url)
        };
        Report {
            report_text: report.response,
            report_url,
        }
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, answers: &AnswerSet) -> Result<Report, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(answers)
            .send()
            .await
            .map_err(|e| SubmissionError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::upstream_status(status.as_u16()));
        }

        let body: UpstreamReport = response
            .json()
            .await
            .map_err(|e| SubmissionError::invalid_response(e.to_string()))?;

        Ok(Self::normalize(body))
    }
}
