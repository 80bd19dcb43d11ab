//! Session event loop

use super::SessionEvent;
use crate::state_machine::{transition, ConversationState, Effect, Event};
use crate::steps::StepTable;
use crate::submission::SubmissionClient;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Event loop owning one conversation, generic over the submission client.
///
/// Commands and submission outcomes arrive on one channel and are applied
/// strictly serially, which is what keeps a single submission outstanding.
pub struct SessionRuntime<C: SubmissionClient + 'static> {
    session_id: String,
    table: Arc<StepTable>,
    state: ConversationState,
    client: Arc<C>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    state_tx: watch::Sender<ConversationState>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
}

impl<C: SubmissionClient + 'static> SessionRuntime<C> {
    pub fn new(
        table: Arc<StepTable>,
        state: ConversationState,
        client: C,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        state_tx: watch::Sender<ConversationState>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            table,
            state,
            client: Arc::new(client),
            event_rx,
            event_tx,
            state_tx,
            broadcast_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            session_id = %self.session_id,
            steps = self.table.len(),
            "Starting session runtime"
        );

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!(session_id = %self.session_id, "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, &self.table, event) {
            Ok(result) => result,
            Err(e) => {
                // Rejections leave the state untouched; the presenter
                // re-prompts for the same step.
                tracing::debug!(session_id = %self.session_id, error = %e, "Command rejected");
                let _ = self.broadcast_tx.send(SessionEvent::Rejected {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.state = result.new_state;
        self.state_tx.send_replace(self.state.clone());
        let _ = self.broadcast_tx.send(SessionEvent::StateChanged {
            state: self.state.clone(),
        });

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::Submit { answers } => {
                // The snapshot travels with the task; live state is never
                // re-read between here and the request.
                let client = Arc::clone(&self.client);
                let event_tx = self.event_tx.clone();
                let session_id = self.session_id.clone();

                tokio::spawn(async move {
                    tracing::info!(
                        session_id = %session_id,
                        answers = answers.len(),
                        "Submitting answers for report generation"
                    );

                    let event = match client.submit(&answers).await {
                        Ok(report) => Event::SubmissionSucceeded { report },
                        Err(e) => {
                            tracing::warn!(
                                session_id = %session_id,
                                kind = ?e.kind,
                                error = %e,
                                "Submission failed"
                            );
                            Event::SubmissionFailed {
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = event_tx.send(event).await;
                });
            }
        }
    }
}
