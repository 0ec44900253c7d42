use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CoachKind;
use crate::errors::ClarifResult;

/// Lifecycle of a coaching episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Init,
    Searching,
    Converged,
    Error,
}

impl EpisodeStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Error)
    }
}

impl fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Searching => "searching",
            Self::Converged => "converged",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Structured summary of one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub episode_id: String,
    pub start_state: String,
    /// Rules joined by `"; "`.
    pub learned_hypothesis: String,
    pub steps: usize,
    pub status: EpisodeStatus,
    pub coach: CoachKind,
    /// Visited-state dump, present when trace reporting is enabled.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub traces: Option<String>,
    pub finished_at: DateTime<Utc>,
}

impl EpisodeReport {
    pub fn to_json(&self) -> ClarifResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
