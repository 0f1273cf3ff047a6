//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Static**: SJF (burst), PRIORITY, ARRIVAL
//! - **Dynamic**: SRT (remaining time), HRN (response ratio)
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.
//! Scores are for display and logging; ranking goes through `compare`,
//! which is exact for every rule here.

use std::cmp::Ordering;

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::Process;

/// Shortest Job First.
///
/// Ranks by total burst time, ignoring how much has already run.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        process.burst_time as f64
    }

    fn compare(&self, a: &Process, b: &Process, _: &DispatchContext, _: f64) -> Ordering {
        a.burst_time.cmp(&b.burst_time)
    }
}

/// Static priority. Numerically smaller priority runs first.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        f64::from(process.priority)
    }

    fn compare(&self, a: &Process, b: &Process, _: &DispatchContext, _: f64) -> Ordering {
        a.priority.cmp(&b.priority)
    }
}

/// Earliest arrival first.
#[derive(Debug, Clone, Copy)]
pub struct Arrival;

impl DispatchingRule for Arrival {
    fn name(&self) -> &'static str {
        "ARRIVAL"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        process.arrival_time as f64
    }

    fn compare(&self, a: &Process, b: &Process, _: &DispatchContext, _: f64) -> Ordering {
        a.arrival_time.cmp(&b.arrival_time)
    }
}

/// Shortest Remaining Time.
#[derive(Debug, Clone, Copy)]
pub struct Srt;

impl DispatchingRule for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        process.remaining_time as f64
    }

    fn compare(&self, a: &Process, b: &Process, _: &DispatchContext, _: f64) -> Ordering {
        a.remaining_time.cmp(&b.remaining_time)
    }
}

/// Highest Response Ratio Next.
///
/// ratio = (waited + burst) / burst, where `waited = now - arrival`.
/// A process that has waited long relative to its length climbs the
/// ranking, so short jobs cannot starve long ones forever.
///
/// Ratios are compared by cross-multiplying in `u128`, so two ratios are
/// equal only when they are exactly equal.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRatio;

impl ResponseRatio {
    /// Response ratio of `process` at the context's clock.
    pub fn ratio(process: &Process, context: &DispatchContext) -> f64 {
        if process.burst_time <= 0 {
            return f64::MAX;
        }
        let (num, den) = Self::fraction(process, context);
        num as f64 / den as f64
    }

    /// `(waited + burst, burst)` as exact integers.
    fn fraction(process: &Process, context: &DispatchContext) -> (u128, u128) {
        let waited = i128::from(context.current_time) - i128::from(process.arrival_time);
        let waited = u128::try_from(waited).unwrap_or(0);
        let burst = u128::try_from(process.burst_time).unwrap_or(0);
        (waited + burst, burst)
    }
}

impl DispatchingRule for ResponseRatio {
    fn name(&self) -> &'static str {
        "HRN"
    }

    fn evaluate(&self, process: &Process, context: &DispatchContext) -> RuleScore {
        -Self::ratio(process, context) // Higher ratio = higher priority → negate
    }

    fn compare(&self, a: &Process, b: &Process, context: &DispatchContext, _: f64) -> Ordering {
        // A non-positive burst counts as an unbounded ratio.
        match (a.burst_time > 0, b.burst_time > 0) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => {
                let (num_a, den_a) = Self::fraction(a, context);
                let (num_b, den_b) = Self::fraction(b, context);
                // Higher ratio runs first, so b's cross product goes on the left.
                (num_b * den_a).cmp(&(num_a * den_b))
            }
        }
    }
}
