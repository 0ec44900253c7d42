//! # clarif-core
//!
//! Foundation crate for the CLARIF coaching system.
//! Defines the rule language (states, actions, conditions, rules, traces),
//! the oracle and coach traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod rules;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ClarifConfig;
pub use errors::{ClarifError, ClarifResult, CoachingError};
pub use rules::{Action, Condition, Predicate, Priority, Rule, State, Trace, Value};
pub use traits::{ICoach, ITargetPolicy, PolicyFn};
