//! Pure state transition function
//!
//! Given the same state, table and event, `transition` always produces the
//! same new state and effects, with no I/O.

use super::state::{ConversationState, Phase, TranscriptEntry};
use super::{Effect, Event};
use crate::steps::{Step, StepKind, StepTable};
use crate::validation::{self, ValidationError};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConversationState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition.
///
/// All of them leave the state untouched; the caller re-presents the
/// active question or reports the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    InvalidAnswer(#[from] ValidationError),

    #[error("Please enter an answer.")]
    EmptyAnswer,

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("No question is active at the current position")]
    NoActiveStep,

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Branch rule: position of the next question after answering `step` at
/// `current`. Answering "No" on a branching select skips exactly the one
/// follow-up step that immediately succeeds it; everything else advances
/// normally.
pub fn next_index(step: &Step, current: usize, answer: &str) -> usize {
    if step.follow_up.is_some() && step.kind == StepKind::Select && answer == "No" {
        current + 2
    } else {
        current + 1
    }
}

/// Pure transition function.
pub fn transition(
    state: &ConversationState,
    table: &StepTable,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (&state.phase, event) {
        // ============================================================
        // Answering
        // ============================================================
        (Phase::Asking { step_index }, Event::AnswerSubmitted { raw }) => {
            let i = *step_index;
            let Some(step) = table.step_at(i) else {
                // Should not occur given the invariants; reject without
                // touching the session rather than crash it.
                return Err(TransitionError::NoActiveStep);
            };

            if raw.trim().is_empty() {
                return Err(TransitionError::EmptyAnswer);
            }
            validation::validate(step.kind, &raw)?;

            let mut next = state.clone();
            next.transcript.push(TranscriptEntry {
                question: step.prompt.to_string(),
                answer: raw.clone(),
            });
            next.answers.insert(step.key, raw.clone());

            let target = next_index(step, i, &raw);
            if target < table.len() {
                next.phase = Phase::Asking { step_index: target };
                Ok(TransitionResult::new(next))
            } else {
                // Questionnaire exhausted. Snapshot the answers here, at
                // transition time; the executor never re-reads live state.
                let snapshot = next.answers.clone();
                next.phase = Phase::Submitting;
                Ok(TransitionResult::new(next).with_effect(Effect::Submit { answers: snapshot }))
            }
        }

        // Exactly one submission may be outstanding
        (Phase::Submitting, Event::AnswerSubmitted { .. } | Event::Retry) => {
            Err(TransitionError::SubmissionInFlight)
        }

        // ============================================================
        // Submission outcomes
        // ============================================================
        (Phase::Submitting, Event::SubmissionSucceeded { report }) => {
            let mut next = state.clone();
            next.phase = Phase::Completed { report };
            Ok(TransitionResult::new(next))
        }

        (Phase::Submitting, Event::SubmissionFailed { error }) => {
            let mut next = state.clone();
            next.phase = Phase::Failed { error };
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Retry and restart
        // ============================================================
        (Phase::Failed { .. }, Event::Retry) => {
            // Resend the accumulated answers unchanged; no new input is
            // consumed and the transcript does not grow.
            let mut next = state.clone();
            next.phase = Phase::Submitting;
            let snapshot = next.answers.clone();
            Ok(TransitionResult::new(next).with_effect(Effect::Submit { answers: snapshot }))
        }

        (_, Event::Restart) => Ok(TransitionResult::new(ConversationState::initial())),

        // A submission settling after a restart raced it lands outside
        // Submitting; discard the stale outcome.
        (_, Event::SubmissionSucceeded { .. } | Event::SubmissionFailed { .. }) => {
            Ok(TransitionResult::new(state.clone()))
        }

        // ============================================================
        // Everything else is a caller bug
        // ============================================================
        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "no transition from {phase:?} with event {event:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Report;

    fn two_step_table() -> StepTable {
        StepTable::new(vec![
            Step::text("name", "name?"),
            Step::select("gender", "gender?", &["Male", "Female", "Other"]),
        ])
    }

    fn branch_table() -> StepTable {
        StepTable::new(vec![
            Step::text("name", "name?"),
            Step::branching("market_research", "researched?", "research_summary"),
            Step::text("research_summary", "summary?"),
            Step::text("concerns", "concerns?"),
        ])
    }

    fn report() -> Report {
        Report {
            report_text: "# Feasibility".to_string(),
            report_url: Some("https://example.com/report.pdf".to_string()),
        }
    }

    fn answer(
        state: &ConversationState,
        table: &StepTable,
        raw: &str,
    ) -> Result<TransitionResult, TransitionError> {
        transition(
            state,
            table,
            Event::AnswerSubmitted {
                raw: raw.to_string(),
            },
        )
    }

    #[test]
    fn answering_advances_and_records() {
        let table = two_step_table();
        let state = ConversationState::initial();

        let result = answer(&state, &table, "Alice").unwrap();
        assert_eq!(result.new_state.phase, Phase::Asking { step_index: 1 });
        assert_eq!(result.new_state.answers.get("name"), Some("Alice"));
        assert_eq!(
            result.new_state.transcript,
            vec![TranscriptEntry {
                question: "name?".to_string(),
                answer: "Alice".to_string(),
            }]
        );
        assert!(result.effects.is_empty());
    }

    #[test]
    fn last_answer_enters_submitting_with_snapshot() {
        let table = two_step_table();
        let state = answer(&ConversationState::initial(), &table, "Alice")
            .unwrap()
            .new_state;

        let result = answer(&state, &table, "Female").unwrap();
        assert_eq!(result.new_state.phase, Phase::Submitting);
        assert_eq!(result.effects.len(), 1);
        let Effect::Submit { answers } = &result.effects[0];
        assert_eq!(answers.get("name"), Some("Alice"));
        assert_eq!(answers.get("gender"), Some("Female"));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn invalid_email_is_rejected_without_state_change() {
        let table = StepTable::new(vec![Step::email("email_id", "email?")]);
        let state = ConversationState::initial();

        let err = answer(&state, &table, "abc").unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidAnswer(ValidationError::InvalidEmail)
        );
        // caller keeps the old state; nothing was recorded
        assert!(state.answers.is_empty());
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn blank_answer_is_rejected() {
        let table = two_step_table();
        let err = answer(&ConversationState::initial(), &table, "   ").unwrap_err();
        assert_eq!(err, TransitionError::EmptyAnswer);
    }

    #[test]
    fn no_on_branching_step_skips_the_follow_up() {
        let table = branch_table();
        let state = answer(&ConversationState::initial(), &table, "Alice")
            .unwrap()
            .new_state;
        assert_eq!(state.phase, Phase::Asking { step_index: 1 });

        let result = answer(&state, &table, "No").unwrap();
        assert_eq!(result.new_state.phase, Phase::Asking { step_index: 3 });
        assert!(!result.new_state.answers.contains_key("research_summary"));
        assert_eq!(result.new_state.transcript.len(), 2);
    }

    #[test]
    fn yes_on_branching_step_enters_the_follow_up() {
        let table = branch_table();
        let state = answer(&ConversationState::initial(), &table, "Alice")
            .unwrap()
            .new_state;

        let result = answer(&state, &table, "Yes").unwrap();
        assert_eq!(result.new_state.phase, Phase::Asking { step_index: 2 });
    }

    #[test]
    fn non_no_select_value_enters_the_follow_up() {
        // anything but the literal "No" advances normally
        let table = branch_table();
        let state = answer(&ConversationState::initial(), &table, "Alice")
            .unwrap()
            .new_state;

        let result = answer(&state, &table, "no").unwrap();
        assert_eq!(result.new_state.phase, Phase::Asking { step_index: 2 });
    }

    #[test]
    fn submission_success_completes() {
        let table = two_step_table();
        let mut state = ConversationState::initial();
        state = answer(&state, &table, "Alice").unwrap().new_state;
        state = answer(&state, &table, "Female").unwrap().new_state;

        let result = transition(
            &state,
            &table,
            Event::SubmissionSucceeded { report: report() },
        )
        .unwrap();
        assert_eq!(result.new_state.phase, Phase::Completed { report: report() });
        // answers and transcript survive completion
        assert_eq!(result.new_state.answers.len(), 2);
        assert_eq!(result.new_state.transcript.len(), 2);
    }

    #[test]
    fn submission_failure_then_retry_resends_identical_answers() {
        let table = two_step_table();
        let mut state = ConversationState::initial();
        state = answer(&state, &table, "Alice").unwrap().new_state;
        let submit = answer(&state, &table, "Female").unwrap();
        let Effect::Submit { answers: first } = &submit.effects[0];
        state = submit.new_state;

        state = transition(
            &state,
            &table,
            Event::SubmissionFailed {
                error: "connection reset".to_string(),
            },
        )
        .unwrap()
        .new_state;
        assert!(matches!(state.phase, Phase::Failed { .. }));

        let retry = transition(&state, &table, Event::Retry).unwrap();
        assert_eq!(retry.new_state.phase, Phase::Submitting);
        assert_eq!(retry.effects.len(), 1);
        let Effect::Submit { answers: second } = &retry.effects[0];
        assert_eq!(first, second);
        // no transcript entry was added by the retry
        assert_eq!(retry.new_state.transcript.len(), 2);
    }

    #[test]
    fn answering_or_retrying_while_submitting_is_rejected() {
        let table = two_step_table();
        let mut state = ConversationState::initial();
        state = answer(&state, &table, "Alice").unwrap().new_state;
        state = answer(&state, &table, "Female").unwrap().new_state;
        assert_eq!(state.phase, Phase::Submitting);

        assert_eq!(
            answer(&state, &table, "again").unwrap_err(),
            TransitionError::SubmissionInFlight
        );
        assert_eq!(
            transition(&state, &table, Event::Retry).unwrap_err(),
            TransitionError::SubmissionInFlight
        );
    }

    #[test]
    fn restart_resets_from_any_phase() {
        let table = two_step_table();
        let mut mid = ConversationState::initial();
        mid = answer(&mid, &table, "Alice").unwrap().new_state;

        let mut failed = answer(&mid, &table, "Female").unwrap().new_state;
        failed = transition(
            &failed,
            &table,
            Event::SubmissionFailed {
                error: "boom".to_string(),
            },
        )
        .unwrap()
        .new_state;

        let mut completed = answer(&mid, &table, "Female").unwrap().new_state;
        completed = transition(
            &completed,
            &table,
            Event::SubmissionSucceeded { report: report() },
        )
        .unwrap()
        .new_state;

        for state in [mid, failed, completed] {
            let result = transition(&state, &table, Event::Restart).unwrap();
            assert_eq!(result.new_state, ConversationState::initial());
            assert!(result.effects.is_empty());
        }
    }

    #[test]
    fn stale_submission_outcome_is_discarded() {
        // restart raced an in-flight submission; its settlement must not
        // disturb the fresh session
        let table = two_step_table();
        let state = ConversationState::initial();

        let result = transition(
            &state,
            &table,
            Event::SubmissionSucceeded { report: report() },
        )
        .unwrap();
        assert_eq!(result.new_state, state);
        assert!(result.effects.is_empty());

        let result = transition(
            &state,
            &table,
            Event::SubmissionFailed {
                error: "late".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, state);
    }

    #[test]
    fn retry_outside_failed_is_invalid() {
        let table = two_step_table();
        let err = transition(&ConversationState::initial(), &table, Event::Retry).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition(_)));
    }

    #[test]
    fn asking_past_the_table_is_rejected_defensively() {
        let table = two_step_table();
        let mut state = ConversationState::initial();
        state.phase = Phase::Asking { step_index: 99 };

        let err = answer(&state, &table, "anything").unwrap_err();
        assert_eq!(err, TransitionError::NoActiveStep);
    }

    #[test]
    fn failed_retry_success_reaches_completed() {
        // end-to-end: failure, explicit retry, then success
        let table = two_step_table();
        let mut state = ConversationState::initial();
        state = answer(&state, &table, "Alice").unwrap().new_state;
        state = answer(&state, &table, "Female").unwrap().new_state;
        state = transition(
            &state,
            &table,
            Event::SubmissionFailed {
                error: "timeout".to_string(),
            },
        )
        .unwrap()
        .new_state;
        state = transition(&state, &table, Event::Retry).unwrap().new_state;
        assert_eq!(state.phase, Phase::Submitting);
        state = transition(
            &state,
            &table,
            Event::SubmissionSucceeded { report: report() },
        )
        .unwrap()
        .new_state;
        assert_eq!(state.phase, Phase::Completed { report: report() });
    }

    #[test]
    fn next_index_skips_only_for_no_on_branching_selects() {
        let branching = Step::branching("a", "a?", "b");
        assert_eq!(next_index(&branching, 4, "No"), 6);
        assert_eq!(next_index(&branching, 4, "Yes"), 5);
        assert_eq!(next_index(&branching, 4, "Maybe"), 5);

        let plain = Step::select("c", "c?", &["Yes", "No"]);
        assert_eq!(next_index(&plain, 4, "No"), 5);
    }
}
