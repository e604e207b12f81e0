//! Task dispatch and join.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};

use super::resources::TaskContext;
use super::task::process_target;
use crate::error_handling::FailureKind;
use crate::initialization::init_semaphore;
use crate::lookup::HostLookup;
use crate::target::Target;

/// Spawns one task per target and waits for all of them.
///
/// At most `config.threads` tasks are past the admission gate at any time.
/// Tasks complete in any order. A panicking task is counted as failed and
/// never affects its siblings.
pub async fn dispatch<L>(targets: Vec<Target>, ctx: Arc<TaskContext<L>>)
where
    L: HostLookup + 'static,
{
    let gate = init_semaphore(ctx.config.threads);
    debug!(
        "Dispatching {} targets with {} concurrent lookups",
        targets.len(),
        gate.available_permits()
    );

    let mut tasks = FuturesUnordered::new();
    for target in targets {
        ctx.counters.total.fetch_add(1, Ordering::SeqCst);
        tasks.push(tokio::spawn(process_target(
            target,
            Arc::clone(&gate),
            Arc::clone(&ctx),
        )));
    }

    while let Some(task_result) = tasks.next().await {
        if let Err(join_error) = task_result {
            ctx.counters.failed.fetch_add(1, Ordering::SeqCst);
            ctx.stats.increment(FailureKind::TaskPanic);
            warn!("Task panicked: {:?}", join_error);
        }
    }
}
