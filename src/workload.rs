//! Synthetic workload generation.
//!
//! Produces random but reproducible process batches for what-if
//! comparisons. The same seed always yields the same batch.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Shape of a generated batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of processes.
    pub count: usize,
    /// Arrival times are drawn from `0..=max_arrival`.
    pub max_arrival: i64,
    /// Burst time range (lower bound at least 1).
    pub burst: RangeInclusive<i64>,
    /// Priority range.
    pub priority: RangeInclusive<i32>,
}

impl WorkloadSpec {
    /// Creates a spec for `count` processes with small default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_arrival: 10,
            burst: 1..=10,
            priority: 0..=5,
        }
    }

    /// Sets the latest possible arrival time.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the burst time range. Values below 1 are raised to 1.
    pub fn with_burst(mut self, burst: RangeInclusive<i64>) -> Self {
        let lo = (*burst.start()).max(1);
        let hi = (*burst.end()).max(lo);
        self.burst = lo..=hi;
        self
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, priority: RangeInclusive<i32>) -> Self {
        self.priority = priority;
        self
    }

    /// Generates a batch from a seed.
    pub fn generate(&self, seed: u64) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with(&mut rng)
    }

    /// Generates a batch from the given RNG. IDs run from 1 to `count`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Vec<Process> {
        (1..=self.count as u32)
            .map(|id| {
                let arrival = rng.random_range(0..=self.max_arrival.max(0));
                let burst = rng.random_range(self.burst.clone());
                let priority = if self.priority.is_empty() {
                    0
                } else {
                    rng.random_range(self.priority.clone())
                };
                Process::new(id, arrival, burst).with_priority(priority)
            })
            .collect()
    }
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self::new(5)
    }
}
