use crate::errors::ClarifResult;
use crate::models::Evaluation;
use crate::rules::Trace;

/// Evaluates learner traces and synthesizes corrective feedback.
pub trait ICoach: Send + Sync {
    /// Judge the traces of one search. Must be idempotent for equal input.
    fn evaluate_inference(&self, traces: &[Trace]) -> ClarifResult<Evaluation>;
}
