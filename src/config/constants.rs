//! Configuration constants.
//!
//! This module defines the defaults and limits used throughout the application:
//! endpoints, timeouts, concurrency and size limits.

use std::time::Duration;

/// Default number of concurrent lookups (admission gate permits).
pub const DEFAULT_THREADS: usize = 8;

/// Default delay applied after a failed remote lookup, before the task gives
/// up its admission slot.
pub const DEFAULT_FAILURE_DELAY: Duration = Duration::from_secs(1);

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Progress logging interval in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

// Network operation timeouts
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS attempts per query before giving up
pub const DNS_ATTEMPTS: usize = 2;

// Remote endpoints
/// Shodan InternetDB (free, keyless): `{ip, ports, hostnames, cpes, tags, vulns}`
pub const INTERNETDB_URL: &str = "https://internetdb.shodan.io/";
/// Shodan host API: `{ip_str, ports, asn, org, domains, hostnames}`
pub const SHODAN_HOST_URL: &str = "https://api.shodan.io/shodan/host/";

/// Default User-Agent string for API requests.
pub const DEFAULT_USER_AGENT: &str = concat!("portmap/", env!("CARGO_PKG_VERSION"));

// Response and input size limits
/// Maximum response body size in bytes (1MB).
/// Host documents are small; anything larger is rejected rather than decoded.
pub const MAX_RESPONSE_BODY_SIZE: usize = 1024 * 1024;

/// Largest CIDR block (in addresses) that is expanded into targets.
/// A /16 for IPv4, a /112 for IPv6.
pub const MAX_CIDR_HOSTS: u128 = 65_536;
