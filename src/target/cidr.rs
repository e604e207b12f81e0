//! CIDR expansion.
//!
//! IPv4 blocks of /30 and wider skip the network and broadcast addresses.
//! /31 (point-to-point) and /32 keep every address, as does IPv6, which
//! has no broadcast. Addresses come out in ascending order.

use std::net::{IpAddr, Ipv4Addr};

use ipnetwork::IpNetwork;

use crate::config::MAX_CIDR_HOSTS;
use crate::error_handling::ResolutionError;

/// Expands a CIDR block into its host addresses.
///
/// # Errors
///
/// Returns `ResolutionError::InvalidCidr` if `input` is not CIDR notation and
/// `ResolutionError::CidrTooLarge` if it covers more than `MAX_CIDR_HOSTS`
/// addresses.
pub fn expand_cidr(input: &str) -> Result<Vec<IpAddr>, ResolutionError> {
    let network: IpNetwork = input
        .parse()
        .map_err(|source| ResolutionError::InvalidCidr {
            input: input.to_string(),
            source,
        })?;

    let hosts = block_size(&network);
    if hosts > MAX_CIDR_HOSTS {
        return Err(ResolutionError::CidrTooLarge {
            input: input.to_string(),
            hosts,
            limit: MAX_CIDR_HOSTS,
        });
    }

    let addresses = match network {
        IpNetwork::V4(net) => {
            let start = u32::from(net.network());
            let end = u32::from(net.broadcast());
            let (start, end) = if net.prefix() <= 30 {
                (start + 1, end - 1)
            } else {
                (start, end)
            };
            (start..=end)
                .map(|ip| IpAddr::V4(Ipv4Addr::from(ip)))
                .collect()
        }
        IpNetwork::V6(net) => net.iter().map(IpAddr::V6).collect(),
    };
    Ok(addresses)
}

fn block_size(network: &IpNetwork) -> u128 {
    match network {
        IpNetwork::V4(net) => 1u128 << (32 - u32::from(net.prefix())),
        IpNetwork::V6(net) => {
            let bits = 128 - u32::from(net.prefix());
            if bits >= 128 {
                u128::MAX
            } else {
                1u128 << bits
            }
        }
    }
}
