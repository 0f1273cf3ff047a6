//! Dispatch context for rule evaluation.

/// Simulation state passed to dispatching rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Current simulated clock.
    pub current_time: i64,
}

impl DispatchContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }
}
