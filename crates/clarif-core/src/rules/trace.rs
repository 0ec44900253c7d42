//! Learner traces: the states visited and the rules that led to them.

use std::fmt;
use std::sync::Arc;

use super::rule::Rule;
use super::state::State;

/// One transition: the state reached and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub state: State,
    pub rule: Rule,
}

/// A step plus the chain of steps before it.
struct Link {
    step: TraceStep,
    parent: Option<Arc<Link>>,
}

/// A path from the search origin to `end`.
///
/// Steps are stored newest-first in a shared parent chain: extending a trace
/// allocates one link and every prefix stays valid, so a walk of `n` steps
/// that keeps all its prefixes holds `n` links, not `n²` steps.
#[derive(Clone)]
pub struct Trace {
    pub origin: State,
    last: Option<Arc<Link>>,
    len: usize,
}

impl Trace {
    /// The trivial trace: no rule applied.
    pub fn new(state: State) -> Self {
        Self {
            origin: state,
            last: None,
            len: 0,
        }
    }

    /// Extend with one more transition. `self` is left untouched and shares
    /// its steps with the result.
    pub fn extended(&self, state: State, rule: Rule) -> Self {
        Self {
            origin: self.origin.clone(),
            last: Some(Arc::new(Link {
                step: TraceStep { state, rule },
                parent: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Terminal state.
    pub fn end(&self) -> &State {
        self.last.as_ref().map_or(&self.origin, |link| &link.step.state)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn steps_newest_first(&self) -> impl Iterator<Item = &TraceStep> {
        std::iter::successors(self.last.as_deref(), |link| link.parent.as_deref())
            .map(|link| &link.step)
    }

    /// Transitions from the origin onward.
    pub fn steps(&self) -> Vec<&TraceStep> {
        let mut steps: Vec<&TraceStep> = self.steps_newest_first().collect();
        steps.reverse();
        steps
    }

    /// Every visited state paired with the rule applied *at* it; the terminal
    /// state is paired with `None`.
    pub fn decisions(&self) -> Vec<(&State, Option<&Rule>)> {
        let mut out = Vec::with_capacity(self.len + 1);
        let mut current = &self.origin;
        for step in self.steps() {
            out.push((current, Some(&step.rule)));
            current = &step.state;
        }
        out.push((current, None));
        out
    }
}

impl PartialEq for Trace {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.origin == other.origin
            && self.steps_newest_first().eq(other.steps_newest_first())
    }
}

impl Eq for Trace {}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("origin", &self.origin)
            .field("steps", &self.steps())
            .finish()
    }
}

impl Drop for Trace {
    // Unlink iteratively so a long chain does not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.last.take();
        while let Some(link) = next {
            next = match Arc::try_unwrap(link) {
                Ok(mut owned) => owned.parent.take(),
                Err(_) => None,
            };
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.origin)?;
        for step in self.steps() {
            write!(f, " -({})-> [{}]", step.rule.action, step.state)?;
        }
        Ok(())
    }
}
