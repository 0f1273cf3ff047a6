//! Text rendering of simulation results.
//!
//! Renderers are `Display` wrappers, so they can be written to any
//! formatter or turned into a `String` with `to_string()`.
//!
//! # Gantt chart
//!
//! ```text
//! |P1___|P2_|P3______|
//! 0     5   8        16
//! ```
//!
//! Each slice is a `|` followed by its label and padded with `_` to its
//! length; idle gaps are labelled `--`. The axis line marks each slice end.

use std::fmt;

use crate::models::{Slice, Timeline};
use crate::simulation::SimulationReport;

/// Gantt chart of a timeline.
#[derive(Debug, Clone, Copy)]
pub struct GanttChart<'a>(pub &'a Timeline);

/// Full report for one run: heading, Gantt chart, per-process table, averages.
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a>(pub &'a SimulationReport);

/// One-line-per-policy comparison of averages.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonTable<'a>(pub &'a [SimulationReport]);

fn slice_label(slice: &Slice) -> String {
    match slice.process_id {
        Some(id) => format!("P{id}"),
        None => "--".to_string(),
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.slices.first() else {
            return Ok(());
        };

        for slice in &self.0.slices {
            let label = slice_label(slice);
            let pad = (slice.duration() - 2).max(0) as usize;
            write!(f, "|{label}{}", "_".repeat(pad))?;
        }
        writeln!(f, "|")?;

        write!(f, "{}", first.start)?;
        for slice in &self.0.slices {
            let gap = slice.duration().max(0) as usize;
            write!(f, "{}{}", " ".repeat(gap), slice.end)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{} ({})", report.policy, report.policy.description())?;
        writeln!(f, "Gantt chart:")?;
        write!(f, "{}", GanttChart(&report.timeline))?;
        writeln!(f)?;

        writeln!(
            f,
            "{:>4} {:>8} {:>6} {:>9} {:>8} {:>9} {:>11}",
            "PID", "Arrival", "Burst", "Complete", "Waiting", "Response", "Turnaround"
        )?;
        for row in &report.metrics.per_process {
            writeln!(
                f,
                "{:>4} {:>8} {:>6} {:>9} {:>8} {:>9} {:>11}",
                format!("P{}", row.id),
                row.arrival_time,
                row.burst_time,
                row.completion_time,
                row.waiting_time,
                row.response_time,
                row.turnaround_time
            )?;
        }
        writeln!(f)?;

        let m = &report.metrics;
        writeln!(f, "Average waiting time:    {:.2}", m.avg_waiting_time)?;
        writeln!(f, "Average response time:   {:.2}", m.avg_response_time)?;
        writeln!(f, "Average turnaround time: {:.2}", m.avg_turnaround_time)?;
        if let Some(util) = report.cpu_utilization() {
            writeln!(f, "CPU utilization:         {:.1}%", util * 100.0)?;
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>9} {:>9} {:>11} {:>9}",
            "Policy", "Waiting", "Response", "Turnaround", "Switches"
        )?;
        for report in self.0 {
            let m = &report.metrics;
            writeln!(
                f,
                "{:<10} {:>9.2} {:>9.2} {:>11.2} {:>9}",
                report.policy.to_string(),
                m.avg_waiting_time,
                m.avg_response_time,
                m.avg_turnaround_time,
                report.timeline.dispatch_count()
            )?;
        }
        Ok(())
    }
}
