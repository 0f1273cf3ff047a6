//! CPU scheduling simulator.
//!
//! Runs classical single-CPU scheduling policies over a fixed batch of
//! processes and reports waiting, response and turnaround times together
//! with the execution timeline (Gantt chart).
//!
//! # Modules
//!
//! - **`models`**: `Process` and the execution `Timeline`
//! - **`dispatching`**: Ranking rules (SJF, priority, SRT, response ratio)
//!   and the rule engine that applies them
//! - **`scheduler`**: The seven policies behind `Policy::schedule`
//! - **`metrics`**: Per-process and average timing indicators
//! - **`validation`**: Batch integrity checks (duplicate IDs, bad times)
//! - **`simulation`**: Stateless driver, `run_policy` / `compare_policies`
//! - **`io`**: Batch file parsing and text reports
//! - **`workload`**: Seeded synthetic batches
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::models::Process;
//! use u_cpu_sched::scheduler::Policy;
//! use u_cpu_sched::simulation::run_policy;
//!
//! let batch = vec![
//!     Process::new(1, 0, 5).with_priority(2),
//!     Process::new(2, 1, 3).with_priority(1),
//!     Process::new(3, 2, 8).with_priority(3),
//! ];
//! let report = run_policy(Policy::RoundRobin { quantum: 2 }, &batch).unwrap();
//! assert_eq!(report.timeline.makespan(), 16);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod io;
pub mod metrics;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use error::{SchedError, SchedErrorKind, SchedResult};
pub use scheduler::{Outcome, Policy};
pub use simulation::{compare_policies, run_policy, SimulationConfig, SimulationReport};
