//! Hostname to address resolution.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::Arc;

use tracing::debug;

/// Resolves a hostname to its addresses.
pub trait HostResolver: Send + Sync {
    fn resolve(&self, hostname: &str) -> io::Result<Vec<IpAddr>>;
}

impl<T: HostResolver + ?Sized> HostResolver for Box<T> {
    fn resolve(&self, hostname: &str) -> io::Result<Vec<IpAddr>> {
        (**self).resolve(hostname)
    }
}

impl<T: HostResolver + ?Sized> HostResolver for Arc<T> {
    fn resolve(&self, hostname: &str) -> io::Result<Vec<IpAddr>> {
        (**self).resolve(hostname)
    }
}

/// Uses the operating system resolver. Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolve(&self, hostname: &str) -> io::Result<Vec<IpAddr>> {
        let addresses: Vec<IpAddr> = (hostname, 0)
            .to_socket_addrs()?
            .map(|addr| addr.ip())
            .collect();
        debug!(hostname, count = addresses.len(), "Resolved host");
        Ok(addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_localhost() {
        let addresses = SystemResolver.resolve("localhost").expect("localhost should resolve");
        assert!(addresses.iter().any(|ip| ip.is_loopback()));
    }

    #[test]
    #[ignore]
    fn test_resolve_real_host() {
        let addresses = SystemResolver.resolve("example.com").expect("example.com should resolve");
        assert!(!addresses.is_empty());
    }
}
