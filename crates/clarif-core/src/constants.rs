/// CLARIF system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Priority assigned to feedback rules synthesized at a deviation state.
pub const FEEDBACK_PRIORITY: i64 = 1;

/// Placeholder written into reduced reports in place of states and hypotheses.
pub const REDACTED: &str = "-";

/// Separator between rules in a rendered hypothesis.
pub const HYPOTHESIS_DELIMITER: &str = "; ";

/// Separator between states within one line of a traces dump.
pub const TRACE_STATE_DELIMITER: &str = " | ";

/// Capacity of the rolling window kept by a convergence tracker.
pub const CONVERGENCE_HISTORY: usize = 100;
