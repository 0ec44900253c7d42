use std::fmt;
use std::sync::Arc;

use crate::errors::ClarifResult;
use crate::rules::{Rule, State};

/// The coach's ground truth: which rule to follow in any state, and when to stop.
///
/// Implementations must be side-effect free and reentrant; one policy is
/// shared read-only across concurrently running episodes.
pub trait ITargetPolicy: Send + Sync {
    /// The correct rule for `state`. Must be total over reachable states.
    fn rule_for(&self, state: &State) -> ClarifResult<Rule>;

    /// Goal predicate.
    fn is_goal(&self, state: &State) -> bool;
}

type RuleFn = dyn Fn(&State) -> ClarifResult<Rule> + Send + Sync;
type GoalFn = dyn Fn(&State) -> bool + Send + Sync;

/// Adapts a pair of closures into an [`ITargetPolicy`].
#[derive(Clone)]
pub struct PolicyFn {
    rule_for: Arc<RuleFn>,
    is_goal: Arc<GoalFn>,
}

impl PolicyFn {
    pub fn new<R, G>(rule_for: R, is_goal: G) -> Self
    where
        R: Fn(&State) -> ClarifResult<Rule> + Send + Sync + 'static,
        G: Fn(&State) -> bool + Send + Sync + 'static,
    {
        Self {
            rule_for: Arc::new(rule_for),
            is_goal: Arc::new(is_goal),
        }
    }

    /// Goal is reaching exactly `goal`.
    pub fn reaching<R>(goal: State, rule_for: R) -> Self
    where
        R: Fn(&State) -> ClarifResult<Rule> + Send + Sync + 'static,
    {
        Self::new(rule_for, move |s| *s == goal)
    }
}

impl fmt::Debug for PolicyFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PolicyFn")
    }
}

impl ITargetPolicy for PolicyFn {
    fn rule_for(&self, state: &State) -> ClarifResult<Rule> {
        (self.rule_for)(state)
    }

    fn is_goal(&self, state: &State) -> bool {
        (self.is_goal)(state)
    }
}
