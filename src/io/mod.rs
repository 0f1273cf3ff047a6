//! Batch input and text output.
//!
//! Kept apart from the scheduling core: policies never read files or
//! print. These helpers turn text into process batches and reports back
//! into text.

pub mod input;
pub mod report;

pub use input::{parse_batch, read_batch_file};
pub use report::{ComparisonTable, GanttChart, RunReport};
