//! The rule language: states, actions, conditions, rules, and traces.

mod action;
mod condition;
mod rule;
mod state;
mod trace;

pub use action::{Action, Transform, TransformFn};
pub use condition::{Condition, Predicate};
pub use rule::{Priority, Rule};
pub use state::{State, Value};
pub use trace::{Trace, TraceStep};
