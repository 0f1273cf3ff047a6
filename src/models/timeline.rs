//! Execution timeline (Gantt chart data).
//!
//! A timeline is the ordered list of CPU slices produced by one policy
//! run: which process held the CPU over which interval, and where the
//! CPU sat idle waiting for the next arrival.

use serde::{Deserialize, Serialize};

/// The execution timeline of a single-CPU run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Slices in clock order, contiguous from the first slice's start.
    pub slices: Vec<Slice>,
}

/// A half-open interval `[start, end)` on the simulated clock.
///
/// `process_id == None` marks an idle gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Running process, or `None` when the CPU is idle.
    pub process_id: Option<u32>,
    /// Start time.
    pub start: i64,
    /// End time.
    pub end: i64,
}

impl Slice {
    /// Creates a run slice.
    pub fn run(process_id: u32, start: i64, end: i64) -> Self {
        Self {
            process_id: Some(process_id),
            start,
            end,
        }
    }

    /// Creates an idle slice.
    pub fn idle(start: i64, end: i64) -> Self {
        Self {
            process_id: None,
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether this slice is an idle gap.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `process_id` ran over `[start, end)`.
    pub fn record_run(&mut self, process_id: u32, start: i64, end: i64) {
        self.push(Slice::run(process_id, start, end));
    }

    /// Records that the CPU was idle over `[start, end)`.
    pub fn record_idle(&mut self, start: i64, end: i64) {
        self.push(Slice::idle(start, end));
    }

    /// Appends a slice, merging it into the last one when it continues it.
    ///
    /// Empty slices are dropped.
    pub fn push(&mut self, slice: Slice) {
        if slice.duration() <= 0 {
            return;
        }
        if let Some(last) = self.slices.last_mut() {
            if last.process_id == slice.process_id && last.end == slice.start {
                last.end = slice.end;
                return;
            }
        }
        self.slices.push(slice);
    }

    /// End of the last slice (0 for an empty timeline).
    pub fn makespan(&self) -> i64 {
        self.slices.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total time the CPU spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.slices
            .iter()
            .filter(|s| !s.is_idle())
            .map(Slice::duration)
            .sum()
    }

    /// Total time the CPU spent idle.
    pub fn idle_time(&self) -> i64 {
        self.slices
            .iter()
            .filter(|s| s.is_idle())
            .map(Slice::duration)
            .sum()
    }

    /// Busy time over makespan. `None` for an empty timeline.
    pub fn cpu_utilization(&self) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / horizon as f64)
    }

    /// All run slices of one process.
    pub fn slices_for_process(&self, process_id: u32) -> Vec<&Slice> {
        self.slices
            .iter()
            .filter(|s| s.process_id == Some(process_id))
            .collect()
    }

    /// Number of times the CPU was handed to a process.
    pub fn dispatch_count(&self) -> usize {
        self.slices.iter().filter(|s| !s.is_idle()).count()
    }

    /// Run slices with idle gaps removed, in clock order.
    pub fn run_slices(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter().filter(|s| !s.is_idle())
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.record_idle(0, 2);
        t.record_run(1, 2, 5);
        t.record_run(2, 5, 6);
        t.record_run(1, 6, 8);
        t
    }

    #[test]
    fn test_timeline_totals() {
        let t = sample_timeline();
        assert_eq!(t.makespan(), 8);
        assert_eq!(t.busy_time(), 6);
        assert_eq!(t.idle_time(), 2);
        assert_eq!(t.dispatch_count(), 3);
        let util = t.cpu_utilization().unwrap();
        assert!((util - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_adjacent_slices_merge() {
        let mut t = Timeline::new();
        t.record_run(1, 0, 1);
        t.record_run(1, 1, 2);
        t.record_run(1, 2, 3);
        t.record_idle(3, 4);
        t.record_idle(4, 6);
        assert_eq!(t.len(), 2);
        assert_eq!(t.slices[0], Slice::run(1, 0, 3));
        assert_eq!(t.slices[1], Slice::idle(3, 6));
    }

    #[test]
    fn test_empty_slice_dropped() {
        let mut t = Timeline::new();
        t.record_idle(0, 0);
        assert!(t.is_empty());
    }

    #[test]
    fn test_slices_for_process() {
        let t = sample_timeline();
        assert_eq!(t.slices_for_process(1).len(), 2);
        assert_eq!(t.slices_for_process(2).len(), 1);
        assert!(t.slices_for_process(9).is_empty());
    }

    #[test]
    fn test_empty_timeline() {
        let t = Timeline::new();
        assert_eq!(t.makespan(), 0);
        assert_eq!(t.cpu_utilization(), None);
        assert_eq!(t.run_slices().count(), 0);
    }
}
