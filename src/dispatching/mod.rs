//! Dispatching rules and rule engine.
//!
//! The non-preemptive policies differ only in how they rank candidate
//! processes. Ranking is expressed as a `DispatchingRule`, and a
//! `RuleEngine` applies one or more rules with a stable sort so equal
//! keys keep their input order. Every built-in rule compares its key
//! exactly, so large times never collapse into false ties.
//!
//! # Usage
//!
//! ```
//! use u_cpu_sched::dispatching::{DispatchContext, RuleEngine};
//! use u_cpu_sched::dispatching::rules;
//! use u_cpu_sched::models::Process;
//!
//! let batch = vec![Process::new(1, 0, 5), Process::new(2, 0, 3)];
//! let engine = RuleEngine::new().with_rule(rules::Sjf);
//! let order = engine.sort_indices(&batch, &DispatchContext::at_time(0));
//! assert_eq!(order, vec![1, 0]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems" (HRN)

mod context;
mod engine;
pub mod rules;

pub use context::DispatchContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = f64;

/// A rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that favour large values
/// (such as the response ratio) return the negated value.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "HRN").
    fn name(&self) -> &'static str;

    /// Scores a process at the given dispatch point.
    fn evaluate(&self, process: &Process, context: &DispatchContext) -> RuleScore;

    /// Orders `a` against `b`; `Less` means `a` runs first.
    ///
    /// The default compares [`evaluate`](Self::evaluate) scores and treats
    /// scores within `epsilon` as equal. Rules over integer keys override
    /// this with an exact comparison.
    fn compare(
        &self,
        a: &Process,
        b: &Process,
        context: &DispatchContext,
        epsilon: f64,
    ) -> Ordering {
        let score_a = self.evaluate(a, context);
        let score_b = self.evaluate(b, context);
        if (score_a - score_b).abs() > epsilon {
            score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal)
        } else {
            Ordering::Equal
        }
    }
}
