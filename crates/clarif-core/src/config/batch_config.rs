use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Hard cap on coaching steps per episode.
    pub max_steps: usize,
    /// In memory mode, stop once the learner no longer needs coaching.
    pub stop_when_converged: bool,
    /// Fraction of zero-step episodes required to call the learner converged.
    pub convergence_threshold: f64,
    /// Number of recent episodes the threshold is measured over.
    pub convergence_window: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_steps: defaults::DEFAULT_BATCH_MAX_STEPS,
            stop_when_converged: defaults::DEFAULT_STOP_WHEN_CONVERGED,
            convergence_threshold: defaults::DEFAULT_CONVERGENCE_THRESHOLD,
            convergence_window: defaults::DEFAULT_CONVERGENCE_WINDOW,
        }
    }
}
