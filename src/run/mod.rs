//! Run orchestration: input parsing, task dispatch, and the final report.

mod coordinator;
mod resources;
mod task;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hickory_resolver::TokioAsyncResolver;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::app::{
    print_failure_statistics, read_input_lines, shutdown_gracefully, spawn_progress_logger,
};
use crate::config::{Config, LOGGING_INTERVAL_SECS};
use crate::error_handling::{FailureKind, FailureStats};
use crate::initialization::{init_client, init_resolver};
use crate::lookup::{HostLookup, LookupClient};
use crate::output::{Annotations, OutputSink};
use crate::target::{parse_line, Target};

pub use coordinator::dispatch;
pub use resources::{RunCounters, TaskContext};
pub use task::report_failure;

/// Results of a portmap run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of targets attempted, including lines that failed to parse
    pub total_targets: usize,
    /// Number of targets whose lookup succeeded
    pub succeeded: usize,
    /// Number of targets that failed at any stage
    pub failed: usize,
    /// Number of records written to the sink
    pub records_emitted: usize,
    /// Non-zero failure counts per kind
    pub failure_counts: Vec<(FailureKind, usize)>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs portmap with the provided configuration.
///
/// Reads target lines from the configured input files (or stdin), looks up
/// every resolved address against the configured API, and writes records to
/// stdout and the optional output file.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the API base URL is
/// invalid, the output file cannot be created, or the sink cannot be flushed.
/// Per-target failures never fail the run.
///
/// # Example
///
/// ```no_run
/// use portmap::{run_portmap, ApiFlavor, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     inputs: vec![PathBuf::from("targets.txt")],
///     flavor: ApiFlavor::InternetDb,
///     ..Default::default()
/// };
/// let report = run_portmap(config).await?;
/// println!("{} records", report.records_emitted);
/// # Ok(())
/// # }
/// ```
pub async fn run_portmap(config: Config) -> Result<RunReport> {
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let lookup = LookupClient::new(client, config.base_url(), config.flavor)
        .context("Failed to initialize lookup client")?;
    let sink = OutputSink::create(&config).context("Failed to open output")?;

    let lines = read_input_lines(&config.inputs).await;
    info!("Read {} input lines", lines.len());

    let resolver = init_resolver();
    run_with(lines, Arc::new(lookup), resolver, Arc::new(sink), config).await
}

/// Runs the pipeline over already-read input lines with injected collaborators.
///
/// # Errors
///
/// Returns an error only if the sink cannot be flushed at the end of the run.
pub async fn run_with<L>(
    lines: Vec<String>,
    lookup: Arc<L>,
    resolver: Arc<TokioAsyncResolver>,
    sink: Arc<OutputSink>,
    config: Config,
) -> Result<RunReport>
where
    L: HostLookup + 'static,
{
    let start_time = Instant::now();
    let stats = Arc::new(FailureStats::new());
    let counters = Arc::new(RunCounters::default());

    let targets = parse_targets(&lines, &config, &stats, &counters);
    debug!("Parsed {} targets from {} lines", targets.len(), lines.len());

    let ctx = Arc::new(TaskContext {
        lookup,
        resolver,
        sink: Arc::clone(&sink),
        annotations: Annotations::from(&config),
        config: Arc::new(config),
        stats: Arc::clone(&stats),
        counters: Arc::clone(&counters),
    });

    let cancel = CancellationToken::new();
    let logging_task = spawn_progress_logger(
        start_time,
        Arc::clone(&counters),
        Duration::from_secs(LOGGING_INTERVAL_SECS),
        cancel.clone(),
    );

    dispatch(targets, ctx).await;

    shutdown_gracefully(cancel, Some(logging_task)).await;
    sink.flush().context("Failed to flush output")?;
    print_failure_statistics(&stats);

    Ok(RunReport {
        total_targets: RunCounters::load(&counters.total),
        succeeded: RunCounters::load(&counters.completed),
        failed: RunCounters::load(&counters.failed),
        records_emitted: RunCounters::load(&counters.records),
        failure_counts: stats.snapshot(),
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

/// Expands input lines into targets, counting lines that fail to parse.
fn parse_targets(
    lines: &[String],
    config: &Config,
    stats: &FailureStats,
    counters: &RunCounters,
) -> Vec<Target> {
    let mut targets = Vec::new();
    for line in lines {
        match parse_line(line) {
            Ok(parsed) => targets.extend(parsed),
            Err(e) => {
                counters
                    .total
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                report_failure(
                    config.verbose,
                    stats,
                    &counters.failed,
                    line.trim(),
                    FailureKind::from(&e),
                    &e,
                );
            }
        }
    }
    targets
}
