// Admission gate behavior: bounded in-flight lookups and permit release.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use helpers::{buffer_sink, FakeLookup};
use portmap::initialization::init_resolver;
use portmap::{run_with, Config, OutputFormat};

fn ip_lines(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("10.2.{}.{}", i / 250, i % 250 + 1)).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_in_flight_lookups_never_exceed_threads() {
    let lookup = Arc::new(FakeLookup {
        fallback_ports: Some(vec![80]),
        delay: Duration::from_millis(20),
        ..Default::default()
    });
    let (sink, buf) = buffer_sink(OutputFormat::Plain);
    let config = Config {
        threads: 4,
        failure_delay: Duration::ZERO,
        ..Default::default()
    };

    let report = run_with(ip_lines(40), Arc::clone(&lookup), init_resolver(), sink, config)
        .await
        .expect("run should succeed");

    let max = lookup.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 4, "observed {max} concurrent lookups with threads=4");
    assert_eq!(max, 4, "gate should be saturated with 40 slow targets");
    assert_eq!(report.records_emitted, 40);
    assert_eq!(buf.lines().len(), 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_thread_serializes_lookups() {
    let lookup = Arc::new(FakeLookup {
        fallback_ports: Some(vec![443]),
        delay: Duration::from_millis(5),
        ..Default::default()
    });
    let (sink, _buf) = buffer_sink(OutputFormat::Plain);
    let config = Config {
        threads: 1,
        failure_delay: Duration::ZERO,
        ..Default::default()
    };

    run_with(ip_lines(10), Arc::clone(&lookup), init_resolver(), sink, config)
        .await
        .expect("run should succeed");

    assert_eq!(lookup.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_permits_are_released_after_failures() {
    let lookup = Arc::new(FakeLookup {
        fail_all: true,
        ..Default::default()
    });
    let (sink, buf) = buffer_sink(OutputFormat::Plain);
    let config = Config {
        threads: 2,
        failure_delay: Duration::ZERO,
        ..Default::default()
    };

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        run_with(ip_lines(20), Arc::clone(&lookup), init_resolver(), sink, config),
    )
    .await
    .expect("run must not stall on leaked permits")
    .expect("run should succeed");

    assert_eq!(report.failed, 20);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 20);
    assert!(buf.contents().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failure_delay_holds_the_slot() {
    let lookup = Arc::new(FakeLookup {
        fail_all: true,
        ..Default::default()
    });
    let (sink, _buf) = buffer_sink(OutputFormat::Plain);
    let config = Config {
        threads: 1,
        failure_delay: Duration::from_millis(50),
        ..Default::default()
    };

    let start = Instant::now();
    let report = run_with(ip_lines(4), lookup, init_resolver(), sink, config)
        .await
        .expect("run should succeed");

    assert_eq!(report.failed, 4);
    assert!(
        start.elapsed() >= Duration::from_millis(200),
        "each failure should delay the next admission, took {:?}",
        start.elapsed()
    );
}
