//! Main application modules.
//!
//! This module provides input reading, the startup banner, progress logging,
//! shutdown handling, and statistics printing used by the main application.

pub mod banner;
pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use banner::print_banner;
pub use input::read_input_lines;
pub use logging::spawn_progress_logger;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_failure_statistics, summary_line};
