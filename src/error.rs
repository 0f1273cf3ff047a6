//! Error types for scheduling runs.
//!
//! Every failure is a problem with the input, never a transient one:
//! the simulation is deterministic, so callers fix the batch and re-run.

use std::fmt;

use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type SchedResult<T> = Result<T, SchedError>;

/// A scheduling error.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedError {
    /// Error category.
    pub kind: SchedErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of scheduling errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedErrorKind {
    /// Malformed or semantically invalid process record or run parameter.
    InvalidInput,
    /// No processes were supplied, so averages are undefined.
    EmptyBatch,
}

impl SchedError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: SchedErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    /// Creates an `EmptyBatch` error.
    pub fn empty_batch() -> Self {
        Self {
            kind: SchedErrorKind::EmptyBatch,
            message: "batch contains no processes".to_string(),
        }
    }

    /// Folds a list of validation problems into a single `InvalidInput` error.
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let joined = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::invalid_input(joined)
    }
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SchedErrorKind::InvalidInput => write!(f, "invalid input: {}", self.message),
            SchedErrorKind::EmptyBatch => write!(f, "empty batch: {}", self.message),
        }
    }
}

impl std::error::Error for SchedError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display() {
        let err = SchedError::invalid_input("burst time must be positive");
        assert_eq!(err.to_string(), "invalid input: burst time must be positive");
        assert_eq!(
            SchedError::empty_batch().to_string(),
            "empty batch: batch contains no processes"
        );
    }

    #[test]
    fn test_from_validation_joins_messages() {
        let errors = vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate process ID: 1"),
            ValidationError::new(ValidationErrorKind::NonPositiveBurst, "P2 has burst time 0"),
        ];
        let err = SchedError::from_validation(&errors);
        assert_eq!(err.kind, SchedErrorKind::InvalidInput);
        assert_eq!(err.message, "Duplicate process ID: 1; P2 has burst time 0");
    }
}
