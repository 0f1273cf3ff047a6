//! Highest Response Ratio Next.
//!
//! Non-preemptive. At every dispatch point the response ratio
//! `(waited + burst) / burst` is recomputed for each arrived process and
//! the highest one runs to completion. Ties go to the process that comes
//! first in input order.
//!
//! # Reference
//! Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems"

use log::debug;

use super::{take_in_order, Outcome};
use crate::dispatching::{rules, DispatchContext, RuleEngine};
use crate::models::{Process, Timeline};

pub(super) fn schedule(mut processes: Vec<Process>) -> Outcome {
    let engine = RuleEngine::new().with_rule(rules::ResponseRatio);
    let mut waiting: Vec<usize> = (0..processes.len()).collect();
    let mut finished: Vec<usize> = Vec::with_capacity(processes.len());
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    while !waiting.is_empty() {
        let ctx = DispatchContext::at_time(current_time);
        let arrived = waiting
            .iter()
            .copied()
            .filter(|&i| processes[i].arrival_time <= current_time);

        let Some(idx) = engine.select_best(&processes, arrived, &ctx) else {
            // Nothing has arrived; the clock moves to the next arrival.
            let next_arrival = waiting
                .iter()
                .map(|&i| processes[i].arrival_time)
                .min()
                .unwrap_or(current_time);
            timeline.record_idle(current_time, next_arrival);
            current_time = next_arrival;
            continue;
        };
        waiting.retain(|&i| i != idx);

        debug!(
            "t={} P{} selected (ratio {:.3})",
            current_time,
            processes[idx].id,
            rules::ResponseRatio::ratio(&processes[idx], &ctx)
        );

        let p = &mut processes[idx];
        p.mark_dispatched(current_time);
        let start = current_time;
        current_time += p.burst_time;
        p.mark_completed(current_time);
        timeline.record_run(p.id, start, current_time);
        finished.push(idx);
    }

    Outcome {
        completed: take_in_order(processes, &finished),
        timeline,
    }
}
