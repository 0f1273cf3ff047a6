//! Process model.
//!
//! A process is the unit of simulated work: it arrives at a point on the
//! simulated clock, needs a fixed amount of CPU time, and carries a static
//! priority. Policies mutate `remaining_time` and fill in the metrics.
//!
//! # Time Representation
//! All times are integer ticks on a simulated clock starting at t=0.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// A simulated process.
///
/// The static inputs (`arrival_time`, `burst_time`, `priority`,
/// `time_quantum`) never change during a run. Metrics stay `None` until the
/// process completes and are fixed from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Identifier, unique within a batch.
    pub id: u32,
    /// Clock time at which the process becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time needed.
    pub burst_time: i64,
    /// Static priority (lower value = higher priority).
    pub priority: i32,
    /// Per-process quantum carried by some input files.
    #[serde(default)]
    pub time_quantum: Option<i64>,
    /// CPU time still needed. Zero means complete.
    pub remaining_time: i64,
    /// Time spent ready but not running.
    #[serde(default)]
    pub waiting_time: Option<i64>,
    /// Delay from arrival to first CPU allocation.
    #[serde(default)]
    pub response_time: Option<i64>,
    /// Time from arrival to completion.
    #[serde(default)]
    pub turnaround_time: Option<i64>,
}

impl Process {
    /// Creates a process with priority 0 and no quantum.
    pub fn new(id: u32, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: 0,
            time_quantum: None,
            remaining_time: burst_time,
            waiting_time: None,
            response_time: None,
            turnaround_time: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the per-process time quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Returns a copy with the run state reset: full remaining time, no metrics.
    ///
    /// Every run starts from fresh copies so state never leaks between policies.
    pub fn fresh(&self) -> Self {
        Self {
            remaining_time: self.burst_time,
            waiting_time: None,
            response_time: None,
            turnaround_time: None,
            ..self.clone()
        }
    }

    /// Whether the process has never been given the CPU.
    #[inline]
    pub fn is_unstarted(&self) -> bool {
        self.remaining_time == self.burst_time
    }

    /// Whether the process has finished.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Records the first dispatch. Later calls leave the value untouched.
    pub(crate) fn mark_dispatched(&mut self, now: i64) {
        if self.response_time.is_none() {
            self.response_time = Some(now - self.arrival_time);
        }
    }

    /// Records completion at `now` and derives turnaround and waiting time.
    pub(crate) fn mark_completed(&mut self, now: i64) {
        let turnaround = now - self.arrival_time;
        self.remaining_time = 0;
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }

    /// Completion time (`arrival + turnaround`), once complete.
    pub fn completion_time(&self) -> Option<i64> {
        self.turnaround_time
            .and_then(|t| self.arrival_time.checked_add(t))
    }
}

/// Returns fresh copies of every process in `batch`.
pub fn fresh_batch(batch: &[Process]) -> Vec<Process> {
    batch.iter().map(Process::fresh).collect()
}
