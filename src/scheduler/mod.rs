//! CPU scheduling policies.
//!
//! Seven classical single-CPU disciplines, modelled as a closed set of
//! variants behind one entry point, [`Policy::schedule`].
//!
//! | Policy | Preemptive | Ranking |
//! |--------|-----------|---------|
//! | FCFS | no | input order |
//! | SJF | no | burst time |
//! | Priority | no | priority value |
//! | Preemptive Priority | yes (unit steps) | priority value |
//! | Round-Robin | yes (quantum) | FIFO |
//! | SRT | yes (unit steps) | remaining time |
//! | HRN | no | response ratio at each dispatch |
//!
//! Every run consumes its own batch and returns the completed processes in
//! completion order together with the execution timeline.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod hrn;
mod nonpreemptive;
mod preemptive;
mod round_robin;

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dispatching::{rules, DispatchingRule, RuleEngine, TieBreaker};
use crate::error::{SchedError, SchedResult};
use crate::models::{Process, Timeline};
use crate::validation::validate_batch;

/// A scheduling policy.
///
/// Lower priority values run first for both priority policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum Policy {
    /// First-Come-First-Served, in input order.
    Fcfs,
    /// Shortest Job First (non-preemptive, by burst time).
    Sjf,
    /// Non-preemptive priority.
    PriorityNonPreemptive,
    /// Preemptive priority, re-evaluated every time unit.
    PriorityPreemptive,
    /// Round-Robin with a fixed quantum.
    RoundRobin {
        /// Maximum contiguous CPU time per dispatch.
        quantum: i64,
    },
    /// Shortest Remaining Time (preemptive SJF).
    Srt,
    /// Highest Response Ratio Next.
    Hrn,
}

/// Result of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Processes in completion order, all metrics populated.
    pub completed: Vec<Process>,
    /// Execution timeline including idle gaps.
    pub timeline: Timeline,
}

impl Policy {
    /// All seven policies, Round-Robin using `quantum`.
    pub fn all(quantum: i64) -> Vec<Policy> {
        vec![
            Policy::Fcfs,
            Policy::Sjf,
            Policy::PriorityNonPreemptive,
            Policy::PriorityPreemptive,
            Policy::RoundRobin { quantum },
            Policy::Srt,
            Policy::Hrn,
        ]
    }

    /// Short name (e.g., "FCFS", "RR").
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::PriorityNonPreemptive => "PRIORITY",
            Policy::PriorityPreemptive => "PRIORITY-P",
            Policy::RoundRobin { .. } => "RR",
            Policy::Srt => "SRT",
            Policy::Hrn => "HRN",
        }
    }

    /// Long name.
    pub fn description(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First-Come-First-Served",
            Policy::Sjf => "Shortest Job First",
            Policy::PriorityNonPreemptive => "Non-preemptive Priority",
            Policy::PriorityPreemptive => "Preemptive Priority",
            Policy::RoundRobin { .. } => "Round-Robin",
            Policy::Srt => "Shortest Remaining Time",
            Policy::Hrn => "Highest Response Ratio Next",
        }
    }

    /// Whether a running process can lose the CPU before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Policy::PriorityPreemptive | Policy::RoundRobin { .. } | Policy::Srt
        )
    }

    /// The Round-Robin quantum, if this policy has one.
    pub fn quantum(&self) -> Option<i64> {
        match self {
            Policy::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Runs this policy over `batch`.
    ///
    /// Run state carried in by the caller (remaining time, metrics) is
    /// discarded; every process starts fresh. The batch is then validated
    /// and nothing is simulated if it is invalid. An empty batch yields an
    /// empty outcome.
    ///
    /// # Errors
    /// `InvalidInput` for duplicate IDs, negative arrivals, non-positive
    /// bursts, a non-positive Round-Robin quantum, or a batch whose clock
    /// would overflow.
    pub fn schedule(&self, batch: Vec<Process>) -> SchedResult<Outcome> {
        let batch: Vec<Process> = batch.iter().map(Process::fresh).collect();
        validate_batch(&batch, self.quantum()).map_err(|e| SchedError::from_validation(&e))?;

        let outcome = match *self {
            Policy::Fcfs => nonpreemptive::schedule(batch, &RuleEngine::new()),
            Policy::Sjf => nonpreemptive::schedule(batch, &RuleEngine::new().with_rule(rules::Sjf)),
            Policy::PriorityNonPreemptive => {
                nonpreemptive::schedule(batch, &RuleEngine::new().with_rule(rules::Priority))
            }
            Policy::PriorityPreemptive => {
                preemptive::schedule(batch, &preemptive_engine(rules::Priority))
            }
            Policy::RoundRobin { quantum } => round_robin::schedule(batch, quantum),
            Policy::Srt => preemptive::schedule(batch, &preemptive_engine(rules::Srt)),
            Policy::Hrn => hrn::schedule(batch),
        };
        Ok(outcome)
    }
}

/// Ready-set ranking for the unit-step policies: the primary key, then
/// earlier arrival, then lower ID.
fn preemptive_engine<R: DispatchingRule + 'static>(primary: R) -> RuleEngine {
    RuleEngine::new()
        .with_rule(primary)
        .with_rule(rules::Arrival)
        .with_final_tie_breaker(TieBreaker::ById)
}

/// Moves processes out of `processes` in the order given by `order`.
fn take_in_order(processes: Vec<Process>, order: &[usize]) -> Vec<Process> {
    let mut slots: Vec<Option<Process>> = processes.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}

/// Moves every process that has arrived by `now` from `pending` into `ready`.
///
/// `pending` must be in arrival order.
fn admit_arrivals<C: Extend<usize>>(
    processes: &[Process],
    pending: &mut VecDeque<usize>,
    ready: &mut C,
    now: i64,
) {
    while let Some(&next) = pending.front() {
        if processes[next].arrival_time > now {
            break;
        }
        ready.extend(Some(next));
        pending.pop_front();
    }
}

/// Indices of `processes` sorted by arrival time (stable).
fn arrival_order(processes: &[Process]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..processes.len()).collect();
    indices.sort_by_key(|&i| processes[i].arrival_time);
    indices
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "RR(q={quantum})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Policy {
    type Err = SchedError;

    /// Parses `fcfs`, `sjf`, `priority`, `priority-p`, `rr:<quantum>`,
    /// `srt` or `hrn` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(q) = lower.strip_prefix("rr:") {
            let quantum = q
                .trim()
                .parse::<i64>()
                .map_err(|_| SchedError::invalid_input(format!("invalid quantum '{q}'")))?;
            if quantum <= 0 {
                return Err(SchedError::invalid_input(format!(
                    "Round-robin quantum must be positive, got {quantum}"
                )));
            }
            return Ok(Policy::RoundRobin { quantum });
        }
        match lower.as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" => Ok(Policy::PriorityNonPreemptive),
            "priority-p" | "priority-preemptive" => Ok(Policy::PriorityPreemptive),
            "rr" => Err(SchedError::invalid_input(
                "Round-robin needs a quantum, e.g. 'rr:2'",
            )),
            "srt" => Ok(Policy::Srt),
            "hrn" => Ok(Policy::Hrn),
            _ => Err(SchedError::invalid_input(format!("unknown policy '{s}'"))),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::SchedErrorKind;

    /// (id, arrival, burst, priority)
    pub(crate) fn batch(rows: &[(u32, i64, i64, i32)]) -> Vec<Process> {
        rows.iter()
            .map(|&(id, arrival, burst, priority)| {
                Process::new(id, arrival, burst).with_priority(priority)
            })
            .collect()
    }

    pub(crate) fn scenario() -> Vec<Process> {
        batch(&[(1, 0, 5, 2), (2, 1, 3, 1), (3, 2, 8, 3)])
    }

    pub(crate) fn ids(completed: &[Process]) -> Vec<u32> {
        completed.iter().map(|p| p.id).collect()
    }

    pub(crate) fn waiting_of(completed: &[Process], id: u32) -> i64 {
        completed
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.waiting_time)
            .unwrap()
    }

    pub(crate) fn assert_invariants(policy: Policy, original: &[Process], outcome: &Outcome) {
        assert_eq!(outcome.completed.len(), original.len(), "{policy}");
        for p in &outcome.completed {
            let w = p.waiting_time.unwrap();
            let r = p.response_time.unwrap();
            let t = p.turnaround_time.unwrap();
            let completion = outcome
                .timeline
                .slices_for_process(p.id)
                .last()
                .map(|s| s.end)
                .unwrap();
            assert!(p.is_complete(), "{policy}: P{}", p.id);
            assert_eq!(t, w + p.burst_time, "{policy}: P{}", p.id);
            assert_eq!(t, completion - p.arrival_time, "{policy}: P{}", p.id);
            assert!(w >= 0 && r >= 0, "{policy}: P{}", p.id);
            if policy.is_preemptive() {
                assert!(r <= w, "{policy}: P{}", p.id);
            } else {
                assert_eq!(r, w, "{policy}: P{}", p.id);
            }
            let ran: i64 = outcome
                .timeline
                .slices_for_process(p.id)
                .iter()
                .map(|s| s.duration())
                .sum();
            assert_eq!(ran, p.burst_time, "{policy}: P{}", p.id);
        }
        let total_burst: i64 = original.iter().map(|p| p.burst_time).sum();
        assert_eq!(outcome.timeline.busy_time(), total_burst, "{policy}");
    }

    #[test]
    fn test_all_policies_hold_invariants() {
        let batches = vec![
            scenario(),
            batch(&[(1, 3, 4, 1), (2, 3, 2, 1), (3, 10, 1, 0), (4, 0, 6, 5)]),
            batch(&[(7, 5, 1, 0)]),
        ];
        for b in &batches {
            for policy in Policy::all(2) {
                let outcome = policy.schedule(b.clone()).unwrap();
                assert_invariants(policy, b, &outcome);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let b = batch(&[(1, 0, 4, 1), (2, 0, 4, 1), (3, 1, 4, 1), (4, 2, 2, 1)]);
        for policy in Policy::all(3) {
            let first = policy.schedule(b.clone()).unwrap();
            let second = policy.schedule(b.clone()).unwrap();
            assert_eq!(first, second, "{policy}");
        }
    }

    #[test]
    fn test_empty_batch() {
        for policy in Policy::all(2) {
            let outcome = policy.schedule(Vec::new()).unwrap();
            assert!(outcome.completed.is_empty());
            assert!(outcome.timeline.is_empty());
        }
    }

    #[test]
    fn test_invalid_batch_rejected() {
        let b = batch(&[(1, 0, 0, 0)]);
        let err = Policy::Srt.schedule(b).unwrap_err();
        assert_eq!(err.kind, SchedErrorKind::InvalidInput);

        let err = Policy::RoundRobin { quantum: 0 }
            .schedule(scenario())
            .unwrap_err();
        assert_eq!(err.kind, SchedErrorKind::InvalidInput);
    }

    #[test]
    fn test_completed_batch_reruns_from_fresh_state() {
        let completed = Policy::Fcfs.schedule(scenario()).unwrap().completed;
        for policy in [Policy::PriorityPreemptive, Policy::Srt] {
            let rerun = policy.schedule(completed.clone()).unwrap();
            assert_eq!(rerun, policy.schedule(scenario()).unwrap(), "{policy}");
            assert_invariants(policy, &completed, &rerun);
        }

        // A stale response time must not survive into the new run.
        let mut stale = scenario();
        stale[2].response_time = Some(0);
        stale[2].remaining_time = 1;
        let outcome = Policy::Srt.schedule(stale).unwrap();
        let p3 = outcome.completed.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(p3.response_time, Some(6));
        assert_eq!(p3.remaining_time, 0);
    }

    #[test]
    fn test_clock_overflow_rejected() {
        for policy in Policy::all(2) {
            let err = policy
                .schedule(vec![Process::new(1, i64::MAX - 1, 5)])
                .unwrap_err();
            assert_eq!(err.kind, SchedErrorKind::InvalidInput, "{policy}");
        }
        let b = vec![Process::new(1, 0, i64::MAX), Process::new(2, 0, 1)];
        assert!(Policy::Fcfs.schedule(b).is_err());
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(Policy::all(2).len(), 7);
        assert_eq!(Policy::RoundRobin { quantum: 4 }.to_string(), "RR(q=4)");
        assert_eq!(Policy::Hrn.to_string(), "HRN");
        assert!(Policy::Srt.is_preemptive());
        assert!(!Policy::Hrn.is_preemptive());
        assert_eq!(Policy::RoundRobin { quantum: 4 }.quantum(), Some(4));
        assert_eq!(Policy::Fcfs.quantum(), None);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("FCFS".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!(
            "priority-p".parse::<Policy>().unwrap(),
            Policy::PriorityPreemptive
        );
        assert_eq!(
            "rr:3".parse::<Policy>().unwrap(),
            Policy::RoundRobin { quantum: 3 }
        );
        assert!("rr".parse::<Policy>().is_err());
        assert!("rr:0".parse::<Policy>().is_err());
        assert!("lottery".parse::<Policy>().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&Policy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(json, r#"{"policy":"round_robin","quantum":2}"#);
        let back: Policy = serde_json::from_str(r#"{"policy":"srt"}"#).unwrap();
        assert_eq!(back, Policy::Srt);
    }
}
