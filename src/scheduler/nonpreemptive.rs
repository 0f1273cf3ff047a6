//! Sort-then-run policies: FCFS, SJF and non-preemptive Priority.
//!
//! # Algorithm
//!
//! 1. Rank the whole batch once with the rule engine (stable).
//! 2. Run each process to completion in that order on a single CPU,
//!    idling forward to its arrival if it has not arrived yet.
//!
//! The ranking looks at the whole batch up front, so a later-arriving
//! short (or high-priority) job can be placed before an earlier one and
//! the CPU idles until it arrives.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the run.

use log::debug;

use super::{take_in_order, Outcome};
use crate::dispatching::{DispatchContext, RuleEngine};
use crate::models::{Process, Timeline};

pub(super) fn schedule(mut processes: Vec<Process>, engine: &RuleEngine) -> Outcome {
    let order = engine.sort_indices(&processes, &DispatchContext::at_time(0));
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    for &idx in &order {
        let p = &mut processes[idx];
        if current_time < p.arrival_time {
            timeline.record_idle(current_time, p.arrival_time);
            current_time = p.arrival_time;
        }

        p.mark_dispatched(current_time);
        let start = current_time;
        current_time += p.burst_time;
        p.mark_completed(current_time);
        timeline.record_run(p.id, start, current_time);

        debug!("P{} ran {}..{} (waited {})", p.id, start, current_time, start - p.arrival_time);
    }

    Outcome {
        completed: take_in_order(processes, &order),
        timeline,
    }
}
