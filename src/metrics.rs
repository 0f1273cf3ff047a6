//! Performance metrics for completed runs.
//!
//! Computes per-process and average timing indicators from a completed
//! process list. Pure: nothing is mutated.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | turnaround - burst |
//! | Response time | first dispatch - arrival |
//! | Turnaround time | completion - arrival |
//! | Throughput | processes completed per time unit over the makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};
use crate::models::Process;

/// Timing indicators for one completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process ID.
    pub id: u32,
    /// Arrival time.
    pub arrival_time: i64,
    /// Burst time.
    pub burst_time: i64,
    /// Completion time.
    pub completion_time: i64,
    /// Waiting time.
    pub waiting_time: i64,
    /// Response time.
    pub response_time: i64,
    /// Turnaround time.
    pub turnaround_time: i64,
}

impl ProcessMetrics {
    /// Extracts the metrics of a completed process.
    ///
    /// # Errors
    /// `InvalidInput` if the process has not completed.
    pub fn from_process(p: &Process) -> SchedResult<Self> {
        match (
            p.waiting_time,
            p.response_time,
            p.turnaround_time,
            p.completion_time(),
        ) {
            (Some(waiting_time), Some(response_time), Some(turnaround_time), Some(completion_time)) => {
                Ok(Self {
                    id: p.id,
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    completion_time,
                    waiting_time,
                    response_time,
                    turnaround_time,
                })
            }
            _ => Err(SchedError::invalid_input(format!(
                "P{} has not completed",
                p.id
            ))),
        }
    }
}

/// Aggregate indicators for a completed batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    /// Per-process rows, in the order given.
    pub per_process: Vec<ProcessMetrics>,
    /// Sum of waiting times.
    pub total_waiting_time: i64,
    /// Sum of response times.
    pub total_response_time: i64,
    /// Sum of turnaround times.
    pub total_turnaround_time: i64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
}

fn checked_total(
    rows: &[ProcessMetrics],
    what: &str,
    field: impl Fn(&ProcessMetrics) -> i64,
) -> SchedResult<i64> {
    rows.iter()
        .try_fold(0i64, |acc, m| acc.checked_add(field(m)))
        .ok_or_else(|| SchedError::invalid_input(format!("total {what} time overflows")))
}

impl BatchMetrics {
    /// Computes metrics from a completed process list.
    ///
    /// # Errors
    /// - `EmptyBatch` if `completed` is empty.
    /// - `InvalidInput` if any process has not completed, or a total does
    ///   not fit in `i64`.
    pub fn calculate(completed: &[Process]) -> SchedResult<Self> {
        if completed.is_empty() {
            return Err(SchedError::empty_batch());
        }

        let per_process = completed
            .iter()
            .map(ProcessMetrics::from_process)
            .collect::<SchedResult<Vec<_>>>()?;

        let total_waiting_time = checked_total(&per_process, "waiting", |m| m.waiting_time)?;
        let total_response_time = checked_total(&per_process, "response", |m| m.response_time)?;
        let total_turnaround_time =
            checked_total(&per_process, "turnaround", |m| m.turnaround_time)?;
        let n = per_process.len() as f64;

        Ok(Self {
            avg_waiting_time: total_waiting_time as f64 / n,
            avg_response_time: total_response_time as f64 / n,
            avg_turnaround_time: total_turnaround_time as f64 / n,
            per_process,
            total_waiting_time,
            total_response_time,
            total_turnaround_time,
        })
    }

    /// Number of processes measured.
    pub fn process_count(&self) -> usize {
        self.per_process.len()
    }

    /// Latest completion time.
    pub fn makespan(&self) -> i64 {
        self.per_process
            .iter()
            .map(|m| m.completion_time)
            .max()
            .unwrap_or(0)
    }

    /// Processes completed per time unit. `None` if the makespan is zero.
    pub fn throughput(&self) -> Option<f64> {
        let makespan = self.makespan();
        if makespan <= 0 {
            return None;
        }
        Some(self.process_count() as f64 / makespan as f64)
    }

    /// Metrics row for one process.
    pub fn for_process(&self, id: u32) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.id == id)
    }
}
