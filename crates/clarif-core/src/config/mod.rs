mod batch_config;
mod coach_config;
pub mod defaults;
mod episode_config;
mod observability_config;

pub use batch_config::BatchConfig;
pub use coach_config::{CoachConfig, CoachKind, FeedbackCondition};
pub use episode_config::EpisodeConfig;
pub use observability_config::ObservabilityConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ClarifError, ClarifResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarifConfig {
    pub episode: EpisodeConfig,
    pub coach: CoachConfig,
    pub batch: BatchConfig,
    pub observability: ObservabilityConfig,
}

impl ClarifConfig {
    /// Parse a TOML document. Missing sections and keys fall back to defaults.
    pub fn from_toml(input: &str) -> ClarifResult<Self> {
        toml::from_str(input).map_err(|e| ClarifError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ClarifResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ClarifError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }
}
