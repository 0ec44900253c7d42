//! # clarif-learning
//!
//! The teaching loop: learner search under a rule hypothesis → coach
//! evaluation → hypothesis update, repeated until the learner reaches the
//! goal or the coach starts repeating itself.

pub mod batch;
pub mod coach;
pub mod convergence;
pub mod episode;
pub mod hypothesis;
pub mod learner;

pub use coach::{build_coach, DirectCoach, ReflexiveCoach};
pub use convergence::ConvergenceTracker;
pub use episode::Episode;
pub use hypothesis::Hypothesis;
pub use learner::Learner;
