//! Per-step input validation
//!
//! Pure: a failed validation reports to the caller and changes nothing.

use crate::steps::StepKind;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email.")]
    InvalidEmail,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

/// Check a raw answer against the step's input class.
///
/// Text and select answers are always accepted here; select options are
/// constrained by the input surface, not re-checked.
pub fn validate(kind: StepKind, raw: &str) -> Result<(), ValidationError> {
    match kind {
        StepKind::Email if !EMAIL_RE.is_match(raw) => Err(ValidationError::InvalidEmail),
        StepKind::Phone if !PHONE_RE.is_match(raw) => Err(ValidationError::InvalidPhone),
        _ => Ok(()),
    }
}
