//! Span definitions per operation: episode, search, coaching.

/// Create an episode span.
#[macro_export]
macro_rules! episode_span {
    ($episode_id:expr, $coach:expr) => {
        tracing::info_span!("clarif.episode", episode_id = %$episode_id, coach = %$coach)
    };
}

/// Create a learner search span.
#[macro_export]
macro_rules! search_span {
    ($attempt:expr, $hypothesis_size:expr) => {
        tracing::debug_span!(
            "clarif.search",
            attempt = $attempt,
            hypothesis_size = $hypothesis_size
        )
    };
}

/// Create a coaching (trace evaluation) span.
#[macro_export]
macro_rules! coaching_span {
    ($coach:expr, $trace_count:expr) => {
        tracing::debug_span!("clarif.coaching", coach = %$coach, trace_count = $trace_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const EPISODE: &str = "clarif.episode";
    pub const SEARCH: &str = "clarif.search";
    pub const COACHING: &str = "clarif.coaching";
}
