//! Hostname resolution.

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;

use super::Target;
use crate::error_handling::ResolutionError;

/// Resolves a hostname to an IP address using DNS.
///
/// # Returns
///
/// The first IP address returned by the resolver.
///
/// # Errors
///
/// Returns an error if DNS resolution fails or no IP addresses are found.
pub async fn resolve_host_to_ip(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<IpAddr, ResolutionError> {
    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|source| ResolutionError::Dns {
            host: host.to_string(),
            source,
        })?;
    response
        .iter()
        .next()
        .ok_or_else(|| ResolutionError::NoAddress(host.to_string()))
}

/// Fills in the address of a hostname target. Targets that already carry an
/// address are returned unchanged without touching DNS.
pub async fn resolve_target(
    target: Target,
    resolver: &TokioAsyncResolver,
) -> Result<Target, ResolutionError> {
    if target.address().is_some() {
        return Ok(target);
    }
    let address = resolve_host_to_ip(target.host(), resolver).await?;
    Ok(target.with_address(address))
}
