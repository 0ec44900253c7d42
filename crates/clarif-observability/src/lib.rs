//! # clarif-observability
//!
//! Tracing subscriber setup and span definitions for episodes, searches,
//! and coaching rounds.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
