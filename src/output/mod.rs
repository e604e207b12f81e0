//! Output sink.
//!
//! Records are produced concurrently by many tasks. Each record is rendered
//! completely before the sink lock is taken, then written to every
//! destination under a single lock acquisition, so two records never
//! interleave and every destination sees the same sequence.

mod format;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Mutex;

use crate::config::{Config, OutputFormat};
use crate::error_handling::InitializationError;

pub use format::{build_records, render, render_plain, Annotations, OutputRecord};

/// A boxed writer the sink fans out to.
pub type Destination = Box<dyn Write + Send>;

/// Thread-safe writer fanning records out to stdout and an optional file.
pub struct OutputSink {
    format: OutputFormat,
    destinations: Mutex<Vec<Destination>>,
}

impl OutputSink {
    /// Creates the sink for a run: stdout, plus the output file if configured.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::OutputFile` if the file cannot be created.
    pub fn create(config: &Config) -> Result<Self, InitializationError> {
        let mut destinations: Vec<Destination> = vec![Box::new(io::stdout())];
        if let Some(ref path) = config.output {
            let file = File::create(path).map_err(|source| InitializationError::OutputFile {
                path: path.clone(),
                source,
            })?;
            destinations.push(Box::new(BufWriter::new(file)));
        }
        Ok(Self::from_writers(config.format, destinations))
    }

    /// Creates a sink over arbitrary writers.
    pub fn from_writers(format: OutputFormat, destinations: Vec<Destination>) -> Self {
        Self {
            format,
            destinations: Mutex::new(destinations),
        }
    }

    /// Writes one record to every destination.
    ///
    /// All destinations are attempted; the first error is returned.
    pub fn emit(&self, record: &OutputRecord) -> io::Result<()> {
        let mut text = render(record, self.format)?;
        text.push('\n');

        let mut destinations = self
            .destinations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut first_error = None;
        for destination in destinations.iter_mut() {
            if let Err(e) = destination.write_all(text.as_bytes()) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Flushes every destination.
    pub fn flush(&self) -> io::Result<()> {
        let mut destinations = self
            .destinations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for destination in destinations.iter_mut() {
            destination.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record(host: &str, port: u16) -> OutputRecord {
        OutputRecord {
            host: host.to_string(),
            port,
            ip: None,
            asn: None,
            org: None,
            hostnames: Vec::new(),
        }
    }

    #[test]
    fn test_emit_duplicates_to_every_destination() {
        let console = SharedBuf::default();
        let file = SharedBuf::default();
        let destinations: Vec<Destination> = vec![Box::new(console.clone()), Box::new(file.clone())];
        let sink = OutputSink::from_writers(OutputFormat::Plain, destinations);

        sink.emit(&record("1.2.3.4", 80)).unwrap();
        sink.emit(&record("1.2.3.4", 443)).unwrap();
        sink.flush().unwrap();

        assert_eq!(console.contents(), "1.2.3.4:80\n1.2.3.4:443\n");
        assert_eq!(file.contents(), console.contents());
    }

    #[test]
    fn test_concurrent_emits_do_not_interleave() {
        let buf = SharedBuf::default();
        let destinations: Vec<Destination> = vec![Box::new(buf.clone())];
        let sink = Arc::new(OutputSink::from_writers(OutputFormat::Json, destinations));

        let handles: Vec<_> = (0..16u16)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    for port in 0..50u16 {
                        sink.emit(&record(&format!("host-{i}.example"), port)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = buf.contents();
        let objects: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&contents)
            .into_iter::<serde_json::Value>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(objects.len(), 16 * 50);
    }

    #[test]
    fn test_create_fails_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output: Some(dir.path().join("missing").join("out.txt")),
            ..Default::default()
        };
        let result = OutputSink::create(&config);
        assert!(matches!(result, Err(InitializationError::OutputFile { .. })));
    }
}
