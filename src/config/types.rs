//! Configuration types.
//!
//! This module defines the enums and the library `Config` struct. None of
//! these depend on the CLI layer; `clap::ValueEnum` is derived only so the
//! CLI can reuse them directly.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_FAILURE_DELAY, DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    INTERNETDB_URL, SHODAN_HOST_URL,
};
use crate::filter::ExclusionSet;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Rendering of emitted records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `host:port [annotations]`, one line per record
    #[default]
    Plain,
    /// Pretty-printed JSON object per record
    Json,
}

/// Which remote API to query. The two endpoints return different schemas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ApiFlavor {
    /// Shodan InternetDB: `{ip, ports, hostnames}`
    #[default]
    InternetDb,
    /// Shodan host API: `{ip_str, ports, asn, org, domains}`
    ShodanHost,
}

impl ApiFlavor {
    /// Default base URL for this flavor. The address is appended as the last path segment.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ApiFlavor::InternetDb => INTERNETDB_URL,
            ApiFlavor::ShodanHost => SHODAN_HOST_URL,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// One explicit value passed into every operation of a run.
///
/// # Examples
///
/// ```no_run
/// use portmap::{ApiFlavor, Config};
///
/// let config = Config {
///     flavor: ApiFlavor::ShodanHost,
///     threads: 16,
///     show_asn: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files; stdin is read when empty
    pub inputs: Vec<PathBuf>,

    /// Remote API to query
    pub flavor: ApiFlavor,

    /// Override for the flavor's base URL
    pub api_url: Option<String>,

    /// Maximum concurrent lookups (admission gate size, at least 1)
    pub threads: usize,

    /// Annotate records with ASN and organization
    pub show_asn: bool,

    /// Annotate records with the resolved IP address
    pub show_ip: bool,

    /// Annotate records with hostnames reported by the API
    pub show_hostnames: bool,

    /// Ports never emitted
    pub exclude_ports: ExclusionSet,

    /// Optional file that receives a copy of every record
    pub output: Option<PathBuf>,

    /// Record rendering
    pub format: OutputFormat,

    /// Surface per-target failures at warn level instead of debug
    pub verbose: bool,

    /// Fixed delay after a failed lookup (zero disables)
    pub failure_delay: Duration,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Base URL of the remote API, honoring the override.
    pub fn base_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.flavor.default_base_url())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            flavor: ApiFlavor::InternetDb,
            api_url: None,
            threads: DEFAULT_THREADS,
            show_asn: false,
            show_ip: false,
            show_hostnames: false,
            exclude_ports: ExclusionSet::default(),
            output: None,
            format: OutputFormat::Plain,
            verbose: false,
            failure_delay: DEFAULT_FAILURE_DELAY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
