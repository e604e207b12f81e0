//! Progress logging utilities.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::run::RunCounters;

/// Logs progress information about target processing.
pub fn log_progress(start_time: Instant, counters: &RunCounters) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = RunCounters::load(&counters.completed);
    let failed = RunCounters::load(&counters.failed);
    let total = RunCounters::load(&counters.total);
    let done = completed + failed;
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {done}/{total} targets ({completed} ok, {failed} failed) in {elapsed_secs:.2}s (~{rate:.2} targets/sec)"
    );
}

/// Spawns a task that logs progress every `interval` until `cancel` fires.
pub fn spawn_progress_logger(
    start_time: Instant,
    counters: Arc<RunCounters>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // first tick fires immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => log_progress(start_time, &counters),
                _ = cancel.cancelled() => break,
            }
        }
    })
}
