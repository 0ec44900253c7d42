mod episode_report;
mod evaluation;
mod search_outcome;

pub use episode_report::{EpisodeReport, EpisodeStatus};
pub use evaluation::Evaluation;
pub use search_outcome::SearchOutcome;
