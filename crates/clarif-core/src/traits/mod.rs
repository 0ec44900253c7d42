mod coach;
mod target_policy;

pub use coach::ICoach;
pub use target_policy::{ITargetPolicy, PolicyFn};
