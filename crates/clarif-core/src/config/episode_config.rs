use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-episode reporting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// When false, reports redact the start state and hypothesis.
    pub full_reporting: bool,
    /// Embed the visited-state dump in the report.
    pub report_traces: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            full_reporting: defaults::DEFAULT_FULL_REPORTING,
            report_traces: defaults::DEFAULT_REPORT_TRACES,
        }
    }
}
