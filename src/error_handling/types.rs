//! Error type definitions.
//!
//! Fatal errors (`ConfigError`, `InitializationError`) stop the run before any
//! target is processed. Per-target errors (`ResolutionError`, `LookupError`)
//! are contained in the task that hit them and only counted.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for malformed configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An item of the exclude-port list is not a port number.
    #[error("invalid port in exclude list: {0:?}")]
    InvalidPort(String),

    /// The thread count must admit at least one lookup.
    #[error("thread count must be at least 1")]
    InvalidThreads,

    /// The thread count exceeds what the admission gate can hold.
    #[error("thread count {requested} exceeds the maximum of {max}")]
    TooManyThreads {
        /// Requested thread count
        requested: usize,
        /// Largest supported thread count
        max: usize,
    },

    /// The API base URL override does not parse.
    #[error("invalid API URL {url:?}: {source}")]
    InvalidApiUrl {
        /// The rejected URL
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// The API base URL is not http(s).
    #[error("unsupported API URL scheme: {0}")]
    UnsupportedApiScheme(String),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The output file could not be created.
    #[error("error creating output file {}: {source}", path.display())]
    OutputFile {
        /// Output file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Why a single input could not be turned into an address.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The input contains `/` but is not a CIDR block.
    #[error("invalid CIDR {input}: {source}")]
    InvalidCidr {
        /// The rejected input
        input: String,
        /// Parse failure
        #[source]
        source: ipnetwork::IpNetworkError,
    },

    /// The CIDR block covers more addresses than are expanded.
    #[error("CIDR {input} covers {hosts} addresses (limit {limit})")]
    CidrTooLarge {
        /// The rejected input
        input: String,
        /// Addresses in the block
        hosts: u128,
        /// Largest block expanded
        limit: u128,
    },

    /// The DNS lookup failed.
    #[error("failed to resolve {host}: {source}")]
    Dns {
        /// Hostname being resolved
        host: String,
        /// Resolver failure
        #[source]
        source: hickory_resolver::error::ResolveError,
    },

    /// The DNS lookup succeeded without any address.
    #[error("no IP address found for {0}")]
    NoAddress(String),
}

/// Why a remote lookup did not produce a result.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The API answered with a non-2xx status.
    #[error("failed to fetch data: {0}")]
    Status(StatusCode),

    /// The response body exceeded the size limit.
    #[error("response body too large ({0} bytes)")]
    BodyTooLarge(usize),

    /// The response body does not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be built from the base URL and address.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Category of a per-target failure, used for end-of-run counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Malformed or oversized CIDR block
    InvalidTarget,
    /// DNS failure or empty answer
    DnsResolution,
    /// Transport failure
    HttpRequest,
    /// Non-2xx response
    HttpStatus,
    /// Body over the size limit
    ResponseTooLarge,
    /// Body did not match the schema
    ResponseDecode,
    /// The target task panicked
    TaskPanic,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidTarget => "Invalid target",
            FailureKind::DnsResolution => "DNS resolution error",
            FailureKind::HttpRequest => "HTTP request error",
            FailureKind::HttpStatus => "HTTP status error",
            FailureKind::ResponseTooLarge => "Response too large",
            FailureKind::ResponseDecode => "Response decode error",
            FailureKind::TaskPanic => "Task panicked",
        }
    }
}

impl From<&ResolutionError> for FailureKind {
    fn from(e: &ResolutionError) -> Self {
        match e {
            ResolutionError::InvalidCidr { .. } | ResolutionError::CidrTooLarge { .. } => {
                FailureKind::InvalidTarget
            }
            ResolutionError::Dns { .. } | ResolutionError::NoAddress(_) => {
                FailureKind::DnsResolution
            }
        }
    }
}

impl From<&LookupError> for FailureKind {
    fn from(e: &LookupError) -> Self {
        match e {
            LookupError::Request(_) | LookupError::Url(_) => FailureKind::HttpRequest,
            LookupError::Status(_) => FailureKind::HttpStatus,
            LookupError::BodyTooLarge(_) => FailureKind::ResponseTooLarge,
            LookupError::Decode(_) => FailureKind::ResponseDecode,
        }
    }
}
