//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, initialization, resolution and lookup
//! - Failure categorization and thread-safe counters
//!
//! Per-target errors never leave the task that produced them: they are
//! categorized, counted, and logged according to the verbose policy.

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{ConfigError, FailureKind, InitializationError, LookupError, ResolutionError};
