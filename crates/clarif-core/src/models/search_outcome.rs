use crate::rules::Trace;

/// Result of one learner search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Whether some trace ends in a goal state.
    pub success: bool,
    /// Every trace recorded during the walk, in discovery order.
    pub traces: Vec<Trace>,
}

impl SearchOutcome {
    /// The most recently recorded trace.
    pub fn last_trace(&self) -> Option<&Trace> {
        self.traces.last()
    }
}
