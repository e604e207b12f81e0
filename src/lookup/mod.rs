//! Remote host lookups.
//!
//! [`HostLookup`] is the seam between the coordinator and the network: the
//! production implementation is [`LookupClient`], which speaks to either
//! Shodan InternetDB or the Shodan host API depending on its [`ApiFlavor`](crate::ApiFlavor).

mod client;
mod schema;

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error_handling::LookupError;

pub use client::{parse_base_url, LookupClient};

/// Decoded API data for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// Queried address
    pub address: IpAddr,
    /// Open ports as reported, in order, duplicates kept
    pub ports: Vec<u16>,
    /// Autonomous system, e.g. `AS13335`
    pub asn: Option<String>,
    /// Organization owning the address
    pub org: Option<String>,
    /// Hostnames and domains associated with the address
    pub hostnames: Vec<String>,
}

/// One remote query per address.
#[async_trait]
pub trait HostLookup: Send + Sync {
    /// Looks up `address`. Errors are per-target and never retried.
    async fn lookup(&self, address: IpAddr) -> Result<LookupResult, LookupError>;
}
