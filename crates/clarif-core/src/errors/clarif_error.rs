use super::CoachingError;

/// Top-level error type for the CLARIF workspace.
#[derive(Debug, thiserror::Error)]
pub enum ClarifError {
    #[error("variable '{key}' not found in state [{state}]")]
    VariableNotFound { key: String, state: String },

    #[error("invalid state literal '{input}': {reason}")]
    InvalidState { input: String, reason: String },

    #[error("episode already finished with status {status}")]
    EpisodeFinished { status: String },

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("coaching error: {0}")]
    Coaching(#[from] CoachingError),
}

pub type ClarifResult<T> = Result<T, ClarifError>;

impl ClarifError {
    /// The coaching failure behind this error, if any.
    pub fn as_coaching(&self) -> Option<&CoachingError> {
        match self {
            Self::Coaching(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this error is the duplicate-feedback guard firing.
    pub fn is_stagnation(&self) -> bool {
        matches!(self, Self::Coaching(CoachingError::Stagnation { .. }))
    }
}
