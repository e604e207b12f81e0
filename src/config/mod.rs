//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, limits)
//! - The library `Config` struct and its enums
//! - CLI option types and parsing

pub mod cli;
mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ApiFlavor, Config, LogFormat, LogLevel, OutputFormat};
