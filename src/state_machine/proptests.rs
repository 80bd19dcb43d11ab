//! Property-based tests for the state machine
//!
//! Random walks over the production questionnaire must uphold the session
//! invariants at every intermediate state.

use super::state::{ConversationState, Phase};
use super::transition::transition;
use super::{Effect, Event};
use crate::steps::{Step, StepKind, StepTable};
use proptest::prelude::*;

/// A plausible valid answer for a step, steered by generated inputs
fn answer_for(step: &Step, choice: usize, text: &str) -> String {
    match step.kind {
        StepKind::Select => step.options[choice % step.options.len()].to_string(),
        StepKind::Phone => "9876543210".to_string(),
        StepKind::Email => "user@example.com".to_string(),
        StepKind::Text => format!("{text}."),
    }
}

/// Drive the machine with valid answers until it leaves `Asking`, checking
/// invariants after every transition. Returns the final state and the
/// keys of the steps actually answered, in order.
fn walk(table: &StepTable, script: &[(usize, String)]) -> (ConversationState, Vec<&'static str>) {
    let mut state = ConversationState::initial();
    let mut answered = Vec::new();

    for (choice, text) in script {
        let Phase::Asking { step_index } = state.phase else {
            break;
        };
        let step = table.step_at(step_index).expect("index within table");
        let raw = answer_for(step, *choice, text);

        let before_index = state.step_index(table.len());
        let result = transition(&state, table, Event::AnswerSubmitted { raw })
            .expect("valid answer must be accepted");
        answered.push(step.key);
        let new_state = result.new_state;

        // transcript grows by exactly one entry per answered step
        assert_eq!(new_state.transcript.len(), answered.len());
        // answers hold exactly the answered keys
        let keys: Vec<&str> = new_state.answers.keys().collect();
        assert_eq!(keys, answered);
        // the step index never decreases, and advances by one or two
        let after_index = new_state.step_index(table.len());
        assert!(after_index > before_index);
        assert!(after_index - before_index <= 2);
        // a submit effect appears exactly on entering Submitting
        match new_state.phase {
            Phase::Submitting => {
                assert_eq!(result.effects.len(), 1);
                let Effect::Submit { answers } = &result.effects[0];
                assert_eq!(answers, &new_state.answers);
            }
            _ => assert!(result.effects.is_empty()),
        }

        state = new_state;
    }

    (state, answered)
}

fn arb_script() -> impl Strategy<Value = Vec<(usize, String)>> {
    proptest::collection::vec((any::<usize>(), "[a-zA-Z0-9 ]{1,12}"), 30)
}

proptest! {
    #[test]
    fn random_walks_uphold_session_invariants(script in arb_script()) {
        let table = StepTable::standard();
        let (state, answered) = walk(&table, &script);

        // 30 generated answers always exhaust the 22-step table
        prop_assert_eq!(&state.phase, &Phase::Submitting);
        // skipped follow-ups never contribute an answer
        for (i, step) in table.iter().enumerate() {
            if let Some(follow_up) = step.follow_up {
                if state.answers.get(step.key) == Some("No") {
                    prop_assert!(!state.answers.contains_key(follow_up));
                    prop_assert_eq!(table.step_at(i + 1).unwrap().key, follow_up);
                }
            }
        }
        prop_assert_eq!(state.transcript.len(), answered.len());
    }

    #[test]
    fn restart_from_any_reachable_state_is_initial(
        script in arb_script(),
        cut in 0usize..30,
    ) {
        let table = StepTable::standard();
        let (state, _) = walk(&table, &script[..cut.min(script.len())]);

        let result = transition(&state, &table, Event::Restart).unwrap();
        prop_assert_eq!(result.new_state, ConversationState::initial());
        prop_assert!(result.effects.is_empty());
    }

    #[test]
    fn malformed_contact_details_never_advance(bad in "[a-z]{1,9}") {
        let table = StepTable::standard();
        // walk up to the phone step with fixed valid answers
        let mut state = ConversationState::initial();
        loop {
            let Phase::Asking { step_index } = state.phase else { break };
            let step = table.step_at(step_index).unwrap();
            if step.kind == StepKind::Phone {
                break;
            }
            let raw = answer_for(step, 0, "answer");
            state = transition(&state, &table, Event::AnswerSubmitted { raw })
                .unwrap()
                .new_state;
        }

        let before = state.clone();
        let err = transition(
            &state,
            &table,
            Event::AnswerSubmitted { raw: bad },
        );
        prop_assert!(err.is_err());
        prop_assert_eq!(state, before);
    }
}
