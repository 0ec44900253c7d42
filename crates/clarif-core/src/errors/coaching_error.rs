/// Coaching-loop errors. All of them are fatal for the episode that raised them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoachingError {
    #[error("coaching stagnated after {steps} steps: coach repeated feedback [{feedback}]")]
    Stagnation { steps: usize, feedback: String },

    #[error("target policy did not reach the goal within {limit} steps from {start}")]
    OracleDiverged { start: String, limit: usize },

    #[error("target policy revisited state {state} while unrolling its trajectory")]
    OracleCycle { state: String },

    #[error("target policy prescribes no change at non-goal state {state}")]
    OracleStuck { state: String },

    #[error("episode exceeded the step limit of {limit}")]
    StepLimitExceeded { limit: usize },
}
