//! Shared run state.
//!
//! Everything a task needs is bundled in [`TaskContext`] and shared behind an
//! `Arc`. Configuration is read-only; the only mutable state is the atomic
//! counters, the failure statistics, and the sink (which locks internally).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;

use crate::config::Config;
use crate::error_handling::FailureStats;
use crate::output::{Annotations, OutputSink};

/// Per-run counters, updated by tasks as they finish.
#[derive(Debug, Default)]
pub struct RunCounters {
    /// Targets dispatched (including parse failures)
    pub total: AtomicUsize,
    /// Targets whose lookup succeeded
    pub completed: AtomicUsize,
    /// Targets that failed at any stage
    pub failed: AtomicUsize,
    /// Records written to the sink
    pub records: AtomicUsize,
}

impl RunCounters {
    /// Reads a counter.
    pub fn load(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Everything a target task reads or updates.
pub struct TaskContext<L> {
    /// Remote lookup implementation
    pub lookup: Arc<L>,
    /// DNS resolver for hostname targets
    pub resolver: Arc<TokioAsyncResolver>,
    /// Destination of emitted records
    pub sink: Arc<OutputSink>,
    /// Read-only run configuration
    pub config: Arc<Config>,
    /// Annotations derived from the configuration
    pub annotations: Annotations,
    /// Per-kind failure counts
    pub stats: Arc<FailureStats>,
    /// Progress counters
    pub counters: Arc<RunCounters>,
}
