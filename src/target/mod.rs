//! Target parsing and resolution.
//!
//! An input line becomes zero or more [`Target`]s:
//! - blank lines and `#` comments yield nothing
//! - one leading `http://` or `https://` is stripped
//! - anything containing `/` is a CIDR block, expanded into one target per host address
//! - IP literals pass through with their address set
//! - everything else is a hostname, resolved later by [`resolve_target`]

mod cidr;
mod resolve;

use std::net::IpAddr;

use crate::error_handling::ResolutionError;

pub use cidr::expand_cidr;
pub use resolve::{resolve_host_to_ip, resolve_target};

/// One unit of work: a host to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    original: String,
    host: String,
    address: Option<IpAddr>,
}

impl Target {
    fn new(original: &str, host: impl Into<String>, address: Option<IpAddr>) -> Self {
        Self {
            original: original.to_string(),
            host: host.into(),
            address,
        }
    }

    /// The trimmed input line this target came from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Scheme-stripped host (or the address text for CIDR members).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Resolved address, `None` until a hostname has been resolved.
    pub fn address(&self) -> Option<IpAddr> {
        self.address
    }

    pub(crate) fn with_address(self, address: IpAddr) -> Self {
        Self {
            address: Some(address),
            ..self
        }
    }
}

/// Trims a line and strips one scheme prefix.
///
/// Returns `None` for blank lines and comments.
pub fn normalize(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or(trimmed);
    // URL-style input: "https://example.com/"
    let host = host.strip_suffix('/').unwrap_or(host);

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Parses one input line into targets.
///
/// # Errors
///
/// Returns a `ResolutionError` when the line looks like a CIDR block but is
/// malformed or too large to expand.
pub fn parse_line(line: &str) -> Result<Vec<Target>, ResolutionError> {
    let Some(host) = normalize(line) else {
        return Ok(Vec::new());
    };
    let original = line.trim();

    if host.contains('/') {
        let addresses = expand_cidr(host)?;
        return Ok(addresses
            .into_iter()
            .map(|addr| Target::new(original, addr.to_string(), Some(addr)))
            .collect());
    }

    let address = host.parse::<IpAddr>().ok();
    Ok(vec![Target::new(original, host, address)])
}
