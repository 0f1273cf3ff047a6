//! Rule engine for multi-rule dispatching.
//!
//! Applies rules in sequence: the next rule is consulted only when the
//! previous ones tie. Remaining ties fall to a final tie-breaker.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchContext, DispatchingRule};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable).
    #[default]
    InputOrder,
    /// Lower process ID first.
    ById,
}

/// A composable rule engine for process ranking.
///
/// An engine with no rules keeps the input order, which is exactly FCFS.
///
/// # Example
/// ```
/// use u_cpu_sched::dispatching::{RuleEngine, TieBreaker};
/// use u_cpu_sched::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Priority)
///     .with_rule(rules::Sjf)
///     .with_final_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "SJF"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Earlier rules take precedence.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in precedence order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts processes by rank (first = dispatched first).
    ///
    /// Returns indices into `processes`. The sort is stable.
    pub fn sort_indices(&self, processes: &[Process], context: &DispatchContext) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b], context));
        indices
    }

    /// Returns the best-ranked index among `candidates`.
    ///
    /// On a full tie the candidate yielded first wins.
    pub fn select_best<I>(
        &self,
        processes: &[Process],
        candidates: I,
        context: &DispatchContext,
    ) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut best: Option<usize> = None;
        for idx in candidates {
            best = match best {
                Some(b)
                    if self.compare(&processes[idx], &processes[b], context)
                        != Ordering::Less =>
                {
                    Some(b)
                }
                _ => Some(idx),
            };
        }
        best
    }

    fn compare(&self, a: &Process, b: &Process, context: &DispatchContext) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.compare(a, b, context, self.epsilon))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| match self.tie_breaker {
                TieBreaker::InputOrder => Ordering::Equal,
                TieBreaker::ById => a.id.cmp(&b.id),
            })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
