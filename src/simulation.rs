//! Simulation driver.
//!
//! Stateless entry points that take a batch, hand each policy its own
//! fresh copy, and collect the results with metrics attached.
//!
//! # Usage
//!
//! ```
//! use u_cpu_sched::models::Process;
//! use u_cpu_sched::scheduler::Policy;
//! use u_cpu_sched::simulation::run_policy;
//!
//! let batch = vec![
//!     Process::new(1, 0, 5).with_priority(2),
//!     Process::new(2, 1, 3).with_priority(1),
//! ];
//! let report = run_policy(Policy::Fcfs, &batch).unwrap();
//! assert_eq!(report.metrics.total_waiting_time, 4);
//! ```

use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};
use crate::metrics::BatchMetrics;
use crate::models::{fresh_batch, Process, Timeline};
use crate::scheduler::Policy;

/// Round-Robin quantum used when neither the config nor the batch sets one.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Which policies to compare, and with what quantum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Policies to run. Round-Robin entries use their own quantum.
    #[serde(default)]
    pub policies: Vec<Policy>,
    /// Quantum for the default policy list.
    ///
    /// `None` = take it from the batch (see [`quantum_from_batch`]), else
    /// [`DEFAULT_QUANTUM`].
    #[serde(default)]
    pub quantum: Option<i64>,
}

impl SimulationConfig {
    /// Creates a config that runs all seven policies.
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
            quantum: None,
        }
    }

    /// Restricts the run to the given policies.
    pub fn with_policies(mut self, policies: Vec<Policy>) -> Self {
        self.policies = policies;
        self
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// The policies to run against `batch`.
    ///
    /// An empty policy list means all seven.
    pub fn resolve_policies(&self, batch: &[Process]) -> Vec<Policy> {
        if !self.policies.is_empty() {
            return self.policies.clone();
        }
        let quantum = self
            .quantum
            .or_else(|| quantum_from_batch(batch))
            .unwrap_or(DEFAULT_QUANTUM);
        Policy::all(quantum)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of running one policy over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy that produced this report.
    pub policy: Policy,
    /// Processes in completion order.
    pub completed: Vec<Process>,
    /// Execution timeline.
    pub timeline: Timeline,
    /// Per-process and average metrics.
    pub metrics: BatchMetrics,
}

impl SimulationReport {
    /// CPU busy time over makespan.
    pub fn cpu_utilization(&self) -> Option<f64> {
        self.timeline.cpu_utilization()
    }
}

/// The per-process quantum shared by every process in `batch`, if any.
///
/// Returns `None` for an empty batch, when some process has no quantum, or
/// when the values disagree.
pub fn quantum_from_batch(batch: &[Process]) -> Option<i64> {
    let first = batch.first()?.time_quantum?;
    batch
        .iter()
        .all(|p| p.time_quantum == Some(first))
        .then_some(first)
}

/// Runs one policy over a fresh copy of `batch`.
///
/// The caller's records are never touched.
///
/// # Errors
/// - `InvalidInput` if the batch or the policy parameter is invalid.
/// - `EmptyBatch` if `batch` is empty.
pub fn run_policy(policy: Policy, batch: &[Process]) -> SchedResult<SimulationReport> {
    info!("running {} over {} processes", policy, batch.len());
    if batch.is_empty() {
        return Err(SchedError::empty_batch());
    }

    let outcome = policy.schedule(fresh_batch(batch))?;
    let metrics = BatchMetrics::calculate(&outcome.completed)?;
    debug!(
        "{}: avg waiting {:.2}, avg response {:.2}, avg turnaround {:.2}",
        policy, metrics.avg_waiting_time, metrics.avg_response_time, metrics.avg_turnaround_time
    );

    Ok(SimulationReport {
        policy,
        completed: outcome.completed,
        timeline: outcome.timeline,
        metrics,
    })
}

/// Runs every configured policy over its own copy of `batch`.
///
/// Each run gets a scoped thread; reports come back in policy order. The
/// first failing policy's error is returned.
pub fn compare_policies(
    batch: &[Process],
    config: &SimulationConfig,
) -> SchedResult<Vec<SimulationReport>> {
    let policies = config.resolve_policies(batch);
    info!("comparing {} policies", policies.len());

    thread::scope(|s| {
        let handles: Vec<_> = policies
            .iter()
            .map(|&policy| s.spawn(move || run_policy(policy, batch)))
            .collect();

        handles
            .into_iter()
            .zip(&policies)
            .map(|(handle, policy)| {
                handle.join().unwrap_or_else(|_| {
                    Err(SchedError::invalid_input(format!("{policy} run panicked")))
                })
            })
            .collect()
    })
}
