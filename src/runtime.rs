//! Session runtime
//!
//! Owns the conversation state and executes effects; all transition logic
//! stays in the pure state machine.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::state_machine::{ConversationState, Event};
use crate::steps::StepTable;
use crate::submission::SubmissionClient;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Notifications pushed to session observers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A transition was applied; the whole new state
    StateChanged { state: ConversationState },
    /// A command was rejected; state is unchanged
    Rejected { message: String },
}

/// Handle for dispatching commands into the session and observing it
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Event>,
    state_rx: watch::Receiver<ConversationState>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Queue an event for the session loop
    pub async fn dispatch(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("session loop stopped: {e}"))
    }

    /// Latest published state
    pub fn snapshot(&self) -> ConversationState {
        self.state_rx.borrow().clone()
    }

    /// Watch receiver for state updates
    #[allow(dead_code)] // Useful for tests and future observers
    pub fn watch(&self) -> watch::Receiver<ConversationState> {
        self.state_rx.clone()
    }

    /// Subscribe to session notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }
}

/// Start the session loop and return its handle.
pub fn spawn_session<C: SubmissionClient + 'static>(
    table: Arc<StepTable>,
    client: C,
) -> SessionHandle {
    let (event_tx, event_rx) = mpsc::channel(32);
    let (broadcast_tx, _) = broadcast::channel(128);
    let initial = ConversationState::initial();
    let (state_tx, state_rx) = watch::channel(initial.clone());

    let runtime = SessionRuntime::new(
        table,
        initial,
        client,
        event_rx,
        event_tx.clone(),
        state_tx,
        broadcast_tx.clone(),
    );
    tokio::spawn(runtime.run());

    SessionHandle {
        event_tx,
        state_rx,
        broadcast_tx,
    }
}
