//! Direct coach: corrects at the terminal state of the learner's last trace.

use std::sync::Arc;

use clarif_core::config::{CoachConfig, CoachKind, FeedbackCondition};
use clarif_core::errors::ClarifResult;
use clarif_core::models::Evaluation;
use clarif_core::rules::{State, Trace};
use clarif_core::traits::{ICoach, ITargetPolicy};
use clarif_observability::coaching_span;
use tracing::debug;

use super::feedback::synthesize_feedback;

/// Coach holding the target policy and the episode's start state.
pub struct DirectCoach {
    policy: Arc<dyn ITargetPolicy>,
    start: State,
    feedback_condition: FeedbackCondition,
}

impl DirectCoach {
    pub fn new(policy: Arc<dyn ITargetPolicy>, start: State, config: &CoachConfig) -> Self {
        Self {
            policy,
            start,
            feedback_condition: config.feedback_condition,
        }
    }

    pub fn policy(&self) -> &dyn ITargetPolicy {
        self.policy.as_ref()
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    /// Shared evaluation skeleton; `select` picks the deviation state from
    /// the last trace.
    pub(crate) fn evaluate_with<F>(
        &self,
        kind: CoachKind,
        traces: &[Trace],
        select: F,
    ) -> ClarifResult<Evaluation>
    where
        F: FnOnce(&Trace) -> State,
    {
        let span = coaching_span!(kind, traces.len());
        let _guard = span.enter();

        let Some(last) = traces.last() else {
            debug!(start = %self.start, "no traces, advising at start");
            let feedback =
                synthesize_feedback(self.policy.as_ref(), &self.start, self.feedback_condition)?;
            return Ok(Evaluation::incorrect(feedback));
        };

        if traces.iter().any(|trace| self.policy.is_goal(trace.end())) {
            return Ok(Evaluation::correct());
        }

        let deviation = select(last);
        let feedback =
            synthesize_feedback(self.policy.as_ref(), &deviation, self.feedback_condition)?;
        debug!(deviation = %deviation, feedback = feedback.len(), "feedback synthesized");
        Ok(Evaluation::incorrect(feedback))
    }
}

impl ICoach for DirectCoach {
    fn evaluate_inference(&self, traces: &[Trace]) -> ClarifResult<Evaluation> {
        self.evaluate_with(CoachKind::Direct, traces, |last| last.end().clone())
    }
}
