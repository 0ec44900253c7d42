//! Coaching strategies: judge learner traces, answer with one corrective rule.

mod direct;
mod feedback;
mod reflexive;

use std::sync::Arc;

use clarif_core::config::{CoachConfig, CoachKind};
use clarif_core::errors::ClarifResult;
use clarif_core::rules::State;
use clarif_core::traits::{ICoach, ITargetPolicy};

pub use direct::DirectCoach;
pub use feedback::synthesize_feedback;
pub use reflexive::ReflexiveCoach;

/// Build the coach selected by `config.kind`, bound to `start`.
pub fn build_coach(
    policy: Arc<dyn ITargetPolicy>,
    start: &State,
    config: &CoachConfig,
) -> ClarifResult<Box<dyn ICoach>> {
    Ok(match config.kind {
        CoachKind::Direct => Box::new(DirectCoach::new(policy, start.clone(), config)),
        CoachKind::Reflexive => Box::new(ReflexiveCoach::new(policy, start.clone(), config)?),
    })
}
