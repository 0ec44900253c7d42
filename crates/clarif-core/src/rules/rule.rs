//! IF-THEN rules: the unit of both hypothesis and feedback.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::ClarifResult;

use super::action::Action;
use super::condition::Condition;
use super::state::State;

/// Rule priority. Higher is preferred.
pub type Priority = i64;

/// Condition + action + priority + explanation.
///
/// Identity is the (condition, action) pair: name, priority, and explanation
/// do not take part in equality or hashing. Ordering compares priority only.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub condition: Condition,
    pub action: Action,
    pub priority: Priority,
    pub explanation: String,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        condition: impl Into<Condition>,
        action: Action,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
            action,
            priority,
            explanation: String::new(),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn applies(&self, state: &State) -> bool {
        self.condition.applies(state)
    }

    /// Successor state under this rule's action. The input is not modified.
    pub fn apply(&self, state: &State) -> ClarifResult<State> {
        self.action.apply(state)
    }

    /// Compare by priority alone.
    pub fn cmp_priority(&self, other: &Rule) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition && self.action == other.action
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.condition.hash(state);
        self.action.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: IF {} THEN {} (priority: {})",
            self.name, self.condition, self.action, self.priority
        )
    }
}
