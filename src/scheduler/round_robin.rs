//! Round-Robin scheduling.
//!
//! # Algorithm
//!
//! 1. Admit arrivals into a FIFO ready queue.
//! 2. Pop the head and run it for `min(quantum, remaining)`.
//! 3. Admit everything that arrived during that slice.
//! 4. Re-enqueue the process at the tail if it is not finished.
//!
//! Step 3 precedes step 4: processes arriving during a slice queue ahead
//! of the process that just used its quantum.

use std::collections::VecDeque;

use log::debug;

use super::{admit_arrivals, arrival_order, take_in_order, Outcome};
use crate::models::{Process, Timeline};

/// Runs Round-Robin. `quantum` has already been validated as positive.
pub(super) fn schedule(mut processes: Vec<Process>, quantum: i64) -> Outcome {
    let mut pending: VecDeque<usize> = arrival_order(&processes).into();
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut finished: Vec<usize> = Vec::with_capacity(processes.len());
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    while !pending.is_empty() || !queue.is_empty() {
        admit_arrivals(&processes, &mut pending, &mut queue, current_time);

        let Some(idx) = queue.pop_front() else {
            if let Some(&next) = pending.front() {
                let next_arrival = processes[next].arrival_time;
                timeline.record_idle(current_time, next_arrival);
                current_time = next_arrival;
            }
            continue;
        };

        let p = &mut processes[idx];
        p.mark_dispatched(current_time);

        let exec_time = quantum.min(p.remaining_time);
        let start = current_time;
        current_time += exec_time;
        p.remaining_time -= exec_time;
        timeline.record_run(p.id, start, current_time);
        debug!("P{} ran {}..{} (remaining {})", p.id, start, current_time, p.remaining_time);

        let done = p.remaining_time == 0;
        if done {
            p.mark_completed(current_time);
        }

        admit_arrivals(&processes, &mut pending, &mut queue, current_time);

        if done {
            finished.push(idx);
        } else {
            queue.push_back(idx);
        }
    }

    Outcome {
        completed: take_in_order(processes, &finished),
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Slice;
    use crate::scheduler::tests::{batch, ids, scenario, waiting_of};
    use crate::scheduler::Policy;

    #[test]
    fn test_rr_scenario() {
        let outcome = Policy::RoundRobin { quantum: 2 }
            .schedule(scenario())
            .unwrap();
        assert_eq!(
            outcome.timeline.slices,
            vec![
                Slice::run(1, 0, 2),
                Slice::run(2, 2, 4),
                Slice::run(3, 4, 6),
                Slice::run(1, 6, 8),
                Slice::run(2, 8, 9),
                Slice::run(3, 9, 11),
                Slice::run(1, 11, 12),
                Slice::run(3, 12, 16),
            ]
        );
        assert_eq!(ids(&outcome.completed), vec![2, 1, 3]);
        assert_eq!(waiting_of(&outcome.completed, 1), 7);
        assert_eq!(waiting_of(&outcome.completed, 2), 5);
        assert_eq!(waiting_of(&outcome.completed, 3), 6);
    }

    #[test]
    fn test_rr_interleaving_raises_waiting() {
        let rr = Policy::RoundRobin { quantum: 2 }
            .schedule(scenario())
            .unwrap();
        let fcfs = Policy::Fcfs.schedule(scenario()).unwrap();
        assert!(waiting_of(&rr.completed, 1) > waiting_of(&fcfs.completed, 1));
        assert_eq!(rr.timeline.dispatch_count(), 8);
        assert_eq!(fcfs.timeline.dispatch_count(), 3);
    }

    #[test]
    fn test_newcomers_queue_ahead_of_preempted() {
        // P2 arrives during P1's first slice and must run before P1 resumes.
        let b = batch(&[(1, 0, 4, 0), (2, 1, 1, 0)]);
        let outcome = Policy::RoundRobin { quantum: 2 }.schedule(b).unwrap();
        assert_eq!(outcome.timeline.slices[1], Slice::run(2, 2, 3));
    }

    #[test]
    fn test_large_quantum_matches_fcfs() {
        let b = batch(&[(1, 0, 5, 0), (2, 1, 3, 0), (3, 9, 2, 0), (4, 9, 4, 0)]);
        let rr = Policy::RoundRobin { quantum: 5 }.schedule(b.clone()).unwrap();
        let fcfs = Policy::Fcfs.schedule(b).unwrap();
        assert_eq!(rr.completed, fcfs.completed);
        assert_eq!(rr.timeline, fcfs.timeline);
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let b = batch(&[(1, 3, 2, 0)]);
        let outcome = Policy::RoundRobin { quantum: 1 }.schedule(b).unwrap();
        assert_eq!(
            outcome.timeline.slices,
            vec![Slice::idle(0, 3), Slice::run(1, 3, 5)]
        );
        assert_eq!(waiting_of(&outcome.completed, 1), 0);
    }
}
