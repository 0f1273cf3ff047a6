//! CPU scheduling domain models.
//!
//! # Domain Mappings
//!
//! | u-cpu-sched | Operating system | Batch queue |
//! |-------------|------------------|-------------|
//! | Process | Process/thread | Job |
//! | Timeline | Gantt chart | Run log |

mod process;
mod timeline;

pub use process::{fresh_batch, Process};
pub use timeline::{Slice, Timeline};
