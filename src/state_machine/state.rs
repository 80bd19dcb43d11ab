//! Conversation session state types

use crate::submission::Report;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Accumulated answers, keyed by step key.
///
/// Identity is by key; iteration and serialization follow answer order.
/// Keys are added only as their step is answered and removed only by a
/// full restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(String, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    #[allow(dead_code)] // API completeness
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[allow(dead_code)] // API completeness
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(dead_code)] // API completeness
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[allow(dead_code)] // API completeness
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One (question, answer) pair of conversation history.
/// Skipped follow-up steps never produce an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
}

/// Lifecycle phase of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Phase {
    /// Presenting the question at `step_index`, waiting for an answer
    Asking { step_index: usize },

    /// Submission request outstanding; exactly one at a time
    Submitting,

    /// Report received (terminal, restart only)
    Completed { report: Report },

    /// Submission failed (terminal but retryable)
    Failed { error: String },
}

/// The whole session as one value. Every event produces a new value;
/// answers, transcript and phase can never observably disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    pub phase: Phase,
    pub answers: AnswerSet,
    pub transcript: Vec<TranscriptEntry>,
}

impl ConversationState {
    pub fn initial() -> Self {
        Self {
            phase: Phase::Asking { step_index: 0 },
            answers: AnswerSet::new(),
            transcript: Vec::new(),
        }
    }

    /// Count of logical progressions made, skips included. Equals the
    /// asking position until the questionnaire is exhausted, then the
    /// table length.
    #[allow(dead_code)] // State query utility
    pub fn step_index(&self, step_count: usize) -> usize {
        match self.phase {
            Phase::Asking { step_index } => step_index,
            _ => step_count,
        }
    }

    /// Check if this is a terminal phase (only restart leads out)
    #[allow(dead_code)] // State query utility
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. } | Phase::Failed { .. })
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::initial()
    }
}
