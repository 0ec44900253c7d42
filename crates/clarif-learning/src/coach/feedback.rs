//! Feedback synthesis at a deviation state.

use clarif_core::config::FeedbackCondition;
use clarif_core::constants::FEEDBACK_PRIORITY;
use clarif_core::errors::ClarifResult;
use clarif_core::rules::{Condition, Rule, State};
use clarif_core::traits::ITargetPolicy;

/// Ask the oracle what to do at `state` and phrase it as at most one rule.
///
/// Returns no rule when the oracle's own action would leave `state` as it is.
pub fn synthesize_feedback(
    policy: &dyn ITargetPolicy,
    state: &State,
    shape: FeedbackCondition,
) -> ClarifResult<Vec<Rule>> {
    let advised = policy.rule_for(state)?;
    if advised.apply(state)? == *state {
        return Ok(Vec::new());
    }

    let rule = match shape {
        FeedbackCondition::OracleRule => advised,
        FeedbackCondition::DeviationState => {
            let explanation = if advised.explanation.is_empty() {
                format!("at {{{state}}} do {}", advised.action)
            } else {
                advised.explanation
            };
            Rule {
                name: advised.name,
                condition: Condition::Exact(state.clone()),
                action: advised.action,
                priority: FEEDBACK_PRIORITY,
                explanation,
            }
        }
    };
    Ok(vec![rule])
}
