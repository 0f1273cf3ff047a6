//! Input validation for process batches.
//!
//! Checks a batch before any policy runs. Detects:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Non-positive time quanta (per-process or for the run)
//! - Batches whose clock would overflow `i64`
//!
//! All problems are collected so the caller sees them at once.

use crate::models::Process;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs no CPU time (or a negative amount).
    NonPositiveBurst,
    /// A time quantum is zero or negative.
    NonPositiveQuantum,
    /// Latest arrival plus total burst exceeds `i64::MAX`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process batch.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. `arrival_time >= 0`
/// 3. `burst_time >= 1`
/// 4. Per-process `time_quantum`, when present, is positive
/// 5. The run quantum, when given, is positive
/// 6. `max(arrival) + sum(burst)` fits in `i64` (no policy's clock can
///    pass that point)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_batch(processes: &[Process], quantum: Option<i64>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("P{} has negative arrival time {}", p.id, p.arrival_time),
            ));
        }

        if p.burst_time < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("P{} has burst time {}", p.id, p.burst_time),
            ));
        }

        if let Some(q) = p.time_quantum {
            if q <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveQuantum,
                    format!("P{} has time quantum {}", p.id, q),
                ));
            }
        }
    }

    if let Some(q) = quantum {
        if q <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("Round-robin quantum must be positive, got {q}"),
            ));
        }
    }

    let latest_arrival = processes
        .iter()
        .map(|p| p.arrival_time)
        .max()
        .unwrap_or(0)
        .max(0);
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time overflows the clock",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5).with_priority(2),
            Process::new(2, 1, 3).with_priority(1),
            Process::new(3, 2, 8).with_priority(3),
        ]
    }

    #[test]
    fn test_valid_batch() {
        assert!(validate_batch(&sample_batch(), None).is_ok());
        assert!(validate_batch(&sample_batch(), Some(2)).is_ok());
        assert!(validate_batch(&[], None).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let batch = vec![Process::new(1, 0, 5), Process::new(1, 2, 3)];
        let errors = validate_batch(&batch, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_negative_arrival() {
        let batch = vec![Process::new(1, -1, 5)];
        let errors = validate_batch(&batch, None).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_zero_burst() {
        let batch = vec![Process::new(1, 0, 0)];
        let errors = validate_batch(&batch, None).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
    }

    #[test]
    fn test_non_positive_quantum() {
        let errors = validate_batch(&sample_batch(), Some(0)).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveQuantum && e.message.contains("Round-robin")));

        let batch = vec![Process::new(1, 0, 5).with_time_quantum(-2)];
        let errors = validate_batch(&batch, None).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveQuantum && e.message.contains("P1")));
    }

    #[test]
    fn test_time_overflow() {
        let batch = vec![Process::new(1, i64::MAX - 1, 5)];
        let errors = validate_batch(&batch, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        let batch = vec![Process::new(1, 0, i64::MAX / 2), Process::new(2, 0, i64::MAX / 2 + 2)];
        let errors = validate_batch(&batch, None).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        // Exactly at the limit is still fine.
        let batch = vec![Process::new(1, i64::MAX - 5, 5)];
        assert!(validate_batch(&batch, None).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let batch = vec![Process::new(1, -3, 0), Process::new(1, 0, 4)];
        let errors = validate_batch(&batch, Some(-1)).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
