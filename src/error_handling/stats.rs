//! Failure statistics tracking.
//!
//! Thread-safe counters for per-target failures, shared across tasks with `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe failure counters, one per [`FailureKind`].
///
/// Every kind is initialized to zero on creation, so lookups never miss.
pub struct FailureStats {
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl FailureStats {
    /// Creates the counters with every kind at zero.
    pub fn new() -> Self {
        let failures = FailureKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        FailureStats { failures }
    }

    /// Increment a failure counter.
    pub fn increment(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map",
                kind
            );
        }
    }

    /// Count for one kind.
    pub fn get(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Non-zero counts in declaration order.
    pub fn snapshot(&self) -> Vec<(FailureKind, usize)> {
        FailureKind::iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
