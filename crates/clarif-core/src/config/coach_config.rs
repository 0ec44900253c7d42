use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which coach drives an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachKind {
    /// Corrects at the terminal state of the learner's last trace.
    #[default]
    Direct,
    /// Corrects where the learner leaves the oracle's own trajectory.
    Reflexive,
}

impl fmt::Display for CoachKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Reflexive => f.write_str("reflexive"),
        }
    }
}

/// Shape of the rule the coach hands back at a deviation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCondition {
    /// Condition is the full deviation state, priority is fixed.
    #[default]
    DeviationState,
    /// Condition and priority are copied from the oracle's rule.
    OracleRule,
}

/// Coach configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    pub kind: CoachKind,
    pub feedback_condition: FeedbackCondition,
    /// Seed mixed into the reflexive coach's deviation sampling.
    pub seed: u64,
    /// Upper bound on the oracle unrolling done by the reflexive coach.
    pub max_trajectory_len: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            kind: CoachKind::default(),
            feedback_condition: FeedbackCondition::default(),
            seed: defaults::DEFAULT_COACH_SEED,
            max_trajectory_len: defaults::DEFAULT_MAX_TRAJECTORY_LEN,
        }
    }
}
