//! Events that drive the session

use crate::submission::Report;

/// Events that trigger state transitions.
///
/// The first, fourth and fifth are presenter commands; the submission
/// outcomes are fed back by the runtime when the in-flight request settles.
#[derive(Debug, Clone)]
pub enum Event {
    /// The user answered the active question
    AnswerSubmitted { raw: String },

    /// The report service replied
    SubmissionSucceeded { report: Report },

    /// The submission attempt failed (transport or upstream status)
    SubmissionFailed { error: String },

    /// Resend the already-accumulated answers after a failure
    Retry,

    /// Throw the session away and start from the first question
    Restart,
}
