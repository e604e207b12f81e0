//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - HTTP client
//! - DNS resolver
//! - Admission gate (semaphore)

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the admission gate that bounds concurrent lookups.
///
/// The count is clamped to `1..=Semaphore::MAX_PERMITS`.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.clamp(1, Semaphore::MAX_PERMITS)))
}
