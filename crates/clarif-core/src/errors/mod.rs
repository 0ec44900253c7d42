mod clarif_error;
mod coaching_error;

pub use clarif_error::{ClarifError, ClarifResult};
pub use coaching_error::CoachingError;
