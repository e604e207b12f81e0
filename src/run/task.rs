//! Per-target task processing.
//!
//! This module contains the pipeline for a single target:
//! resolve → lookup → (failure delay) → filter → emit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;
use tokio::sync::Semaphore;

use super::resources::TaskContext;
use crate::error_handling::{FailureKind, FailureStats, LookupError, ResolutionError};
use crate::lookup::{HostLookup, LookupResult};
use crate::output::build_records;
use crate::target::{resolve_target, Target};

/// Why a target produced no records.
#[derive(Error, Debug)]
pub enum TargetFailure {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl From<&TargetFailure> for FailureKind {
    fn from(failure: &TargetFailure) -> Self {
        match failure {
            TargetFailure::Resolution(e) => FailureKind::from(e),
            TargetFailure::Lookup(e) => FailureKind::from(e),
        }
    }
}

/// Counts a per-target failure and logs it: at warn when verbose, debug otherwise.
pub fn report_failure(
    verbose: bool,
    stats: &FailureStats,
    failed: &AtomicUsize,
    host: &str,
    kind: FailureKind,
    error: &dyn std::fmt::Display,
) {
    failed.fetch_add(1, Ordering::SeqCst);
    stats.increment(kind);
    if verbose {
        warn!("Skipping {host}: {error}");
    } else {
        debug!("Skipping {host}: {error}");
    }
}

/// Process a single target.
///
/// This function is spawned as a Tokio task for each target. The admission
/// permit is held from before the first network call (DNS or HTTP) through
/// the failure delay, and is dropped before filtering and emission. Being an
/// RAII guard, it is also released if the task returns early or panics.
pub async fn process_target<L>(target: Target, gate: Arc<Semaphore>, ctx: Arc<TaskContext<L>>)
where
    L: HostLookup,
{
    let host = target.host().to_string();

    let permit = match gate.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            warn!("Admission gate closed, skipping {host}");
            ctx.counters.failed.fetch_add(1, Ordering::SeqCst);
            return;
        }
    };

    let outcome = resolve_and_lookup(target, &ctx).await;

    if matches!(outcome, Err(TargetFailure::Lookup(_))) {
        let delay = ctx.config.failure_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    drop(permit);

    match outcome {
        Ok((target, result)) => {
            emit_results(&target, &result, &ctx);
            ctx.counters.completed.fetch_add(1, Ordering::SeqCst);
        }
        Err(failure) => report_failure(
            ctx.config.verbose,
            &ctx.stats,
            &ctx.counters.failed,
            &host,
            FailureKind::from(&failure),
            &failure,
        ),
    }
}

async fn resolve_and_lookup<L>(
    target: Target,
    ctx: &TaskContext<L>,
) -> Result<(Target, LookupResult), TargetFailure>
where
    L: HostLookup,
{
    let target = resolve_target(target, &ctx.resolver).await?;
    let Some(address) = target.address() else {
        return Err(ResolutionError::NoAddress(target.host().to_string()).into());
    };
    let result = ctx.lookup.lookup(address).await?;
    Ok((target, result))
}

/// Filters the ports of a result and writes one record per surviving port.
fn emit_results<L>(target: &Target, result: &LookupResult, ctx: &TaskContext<L>) {
    let ports = ctx.config.exclude_ports.filter(&result.ports);
    if ports.is_empty() {
        debug!("No ports to report for {}", target.host());
        return;
    }

    for record in build_records(target, result, &ports, ctx.annotations) {
        match ctx.sink.emit(&record) {
            Ok(()) => {
                ctx.counters.records.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => warn!("Failed to write record for {}: {e}", target.host()),
        }
    }
}
