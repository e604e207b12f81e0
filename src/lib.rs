//! portmap library: open-port discovery through Shodan
//!
//! This library reads targets (hostnames, IP addresses, and CIDR blocks),
//! resolves them to addresses, queries either the keyless Shodan InternetDB or
//! the Shodan host API for each address with bounded concurrency, and writes
//! one record per open port to stdout and an optional output file.
//!
//! # Example
//!
//! ```no_run
//! use portmap::{run_portmap, ApiFlavor, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     inputs: vec![std::path::PathBuf::from("targets.txt")],
//!     flavor: ApiFlavor::InternetDb,
//!     threads: 16,
//!     ..Default::default()
//! };
//!
//! let report = run_portmap(config).await?;
//! eprintln!("Looked up {} targets: {} succeeded, {} failed",
//!           report.total_targets, report.succeeded, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod filter;
pub mod initialization;
pub mod lookup;
pub mod output;
mod run;
pub mod target;

// Re-export public API
pub use app::{print_banner, summary_line};
pub use config::{ApiFlavor, Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{
    ConfigError, FailureKind, FailureStats, InitializationError, LookupError, ResolutionError,
};
pub use filter::ExclusionSet;
pub use lookup::{HostLookup, LookupClient, LookupResult};
pub use output::{OutputRecord, OutputSink};
pub use run::{run_portmap, run_with, RunReport};
pub use target::Target;
