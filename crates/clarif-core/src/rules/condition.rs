//! Rule guards: exact (partial-state) matches and relational predicates.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::state::State;

/// A named boolean test over a state. Identity is the name.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    f: Arc<dyn Fn(&State) -> bool + Send + Sync>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&State) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Predicate satisfied only by states equal to `target`.
    pub fn equals(target: State) -> Self {
        Self::new(format!("== {target}"), move |s| *s == target)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, state: &State) -> bool {
        (self.f)(state)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Predicate {}

impl Hash for Predicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Guard deciding whether a rule applies to a state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Applies when every binding of the (partial) state holds in the tested state.
    Exact(State),
    /// Applies when the predicate holds.
    Relational(Predicate),
}

impl Condition {
    pub fn applies(&self, state: &State) -> bool {
        match self {
            Self::Exact(pattern) => pattern.matches(state),
            Self::Relational(predicate) => predicate.evaluate(state),
        }
    }

    /// The exact pattern, if this is not a relational condition.
    pub fn as_state(&self) -> Option<&State> {
        match self {
            Self::Exact(pattern) => Some(pattern),
            Self::Relational(_) => None,
        }
    }
}

impl From<State> for Condition {
    fn from(state: State) -> Self {
        Self::Exact(state)
    }
}

impl From<Predicate> for Condition {
    fn from(predicate: Predicate) -> Self {
        Self::Relational(predicate)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(pattern) => write!(f, "{{{pattern}}}"),
            Self::Relational(predicate) => write!(f, "<{predicate}>"),
        }
    }
}
