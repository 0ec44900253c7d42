// Single source of truth for all default values.

// --- Episode ---
pub const DEFAULT_FULL_REPORTING: bool = true;
pub const DEFAULT_REPORT_TRACES: bool = false;

// --- Coach ---
pub const DEFAULT_COACH_SEED: u64 = 0x5EED_C0AC;
pub const DEFAULT_MAX_TRAJECTORY_LEN: usize = 10_000;

// --- Batch ---
pub const DEFAULT_BATCH_MAX_STEPS: usize = 10_000;
pub const DEFAULT_STOP_WHEN_CONVERGED: bool = false;
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.95;
pub const DEFAULT_CONVERGENCE_WINDOW: usize = 10;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
