// Shared test helpers for sinks and fake lookups.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::io::{self, Write};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use portmap::output::Destination;
use portmap::{HostLookup, LookupError, LookupResult, OutputFormat, OutputSink};

/// In-memory writer whose contents can be read after the sink is done with it.
#[derive(Clone, Default)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    #[allow(dead_code)] // Used by other test files
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf8 output")
    }

    #[allow(dead_code)] // Used by other test files
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Creates a sink writing into a single in-memory buffer.
#[allow(dead_code)] // Used by other test files
pub fn buffer_sink(format: OutputFormat) -> (Arc<OutputSink>, SharedBuf) {
    let buf = SharedBuf::default();
    let destinations: Vec<Destination> = vec![Box::new(buf.clone())];
    (Arc::new(OutputSink::from_writers(format, destinations)), buf)
}

/// Fake lookup that answers from a fixed table and records peak concurrency.
///
/// Addresses missing from the table fail with a 404 status.
#[derive(Default)]
pub struct FakeLookup {
    pub ports: HashMap<IpAddr, Vec<u16>>,
    pub fallback_ports: Option<Vec<u16>>,
    pub delay: Duration,
    pub fail_all: bool,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
}

#[async_trait]
impl HostLookup for FakeLookup {
    async fn lookup(&self, address: IpAddr) -> Result<LookupResult, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all {
            return Err(LookupError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        let ports = match self.ports.get(&address) {
            Some(ports) => ports.clone(),
            None => match self.fallback_ports {
                Some(ref ports) => ports.clone(),
                None => return Err(LookupError::Status(StatusCode::NOT_FOUND)),
            },
        };
        Ok(LookupResult {
            address,
            ports,
            asn: None,
            org: None,
            hostnames: Vec::new(),
        })
    }
}
