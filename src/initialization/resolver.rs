//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use log::warn;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Initializes the DNS resolver for hostname lookups.
///
/// Name servers and search settings come from the system configuration
/// (`/etc/resolv.conf` on Unix, the registry on Windows), so internal and
/// split-horizon names resolve the same way they do for other programs. If the
/// system configuration cannot be read, the built-in upstream defaults are used.
///
/// Timeouts are kept short so a slow DNS server fails one target instead of
/// holding an admission slot for long. `ndots` is 0 so search domains are never
/// appended to inputs.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let (config, opts) = match read_system_conf() {
        Ok((config, opts)) => (config, opts),
        Err(e) => {
            warn!("Failed to read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    Arc::new(TokioAsyncResolver::tokio(config, with_lookup_limits(opts)))
}

/// Applies portmap's timeout, attempt and ndots settings on top of `opts`.
fn with_lookup_limits(mut opts: ResolverOpts) -> ResolverOpts {
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts
}
