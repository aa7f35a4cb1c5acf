//! Public Suffix List lookups used to split a host into domain and TLD.

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use publicsuffix::{List, Psl};
use tracing::{debug, info};

use super::error::{DomainerError, Result};

/// Derives the registrable domain (public suffix plus one label) of a host.
///
/// Implementations fail with [`DomainerError::UnrecognizedSuffix`] when the
/// host has no registrable domain, for example when it is itself a public
/// suffix or an IP literal.
pub trait SuffixLookup: Send + Sync {
    fn effective_tld_plus_one(&self, host: &str) -> Result<String>;
}

impl<T: SuffixLookup + ?Sized> SuffixLookup for Box<T> {
    fn effective_tld_plus_one(&self, host: &str) -> Result<String> {
        (**self).effective_tld_plus_one(host)
    }
}

impl<T: SuffixLookup + ?Sized> SuffixLookup for Arc<T> {
    fn effective_tld_plus_one(&self, host: &str) -> Result<String> {
        (**self).effective_tld_plus_one(host)
    }
}

/// Rejects hosts that can never carry a registrable domain: empty hosts,
/// leading or trailing dots, empty labels and IP literals.
pub fn check_host(host: &str) -> Result<()> {
    if host.is_empty()
        || host.starts_with('.')
        || host.ends_with('.')
        || host.contains("..")
        || host.parse::<IpAddr>().is_ok()
    {
        debug!(host, "Host cannot carry a registrable domain");
        return Err(DomainerError::unrecognized(host));
    }
    Ok(())
}

/// The Mozilla Public Suffix List snapshot compiled into the `psl` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSuffixList;

impl SuffixLookup for BuiltinSuffixList {
    fn effective_tld_plus_one(&self, host: &str) -> Result<String> {
        check_host(host)?;
        psl::domain_str(host)
            .map(str::to_owned)
            .ok_or_else(|| DomainerError::unrecognized(host))
    }
}

/// A public suffix list loaded at runtime from PSL-formatted text.
#[derive(Clone)]
pub struct SuffixList {
    list: List,
}

impl SuffixList {
    /// Parses PSL-formatted text.
    pub fn from_psl_string(data: &str) -> Result<Self> {
        let list = List::from_bytes(data.as_bytes()).map_err(|e| {
            DomainerError::InvalidSuffixList {
                path: "<inline>".to_owned(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { list })
    }

    /// Reads and parses a PSL file such as `public_suffix_list.dat`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| DomainerError::InvalidSuffixList {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let list = List::from_bytes(&data).map_err(|e| DomainerError::InvalidSuffixList {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("Loaded public suffix list from {}", path.display());
        Ok(Self { list })
    }
}

impl std::fmt::Debug for SuffixList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuffixList").finish_non_exhaustive()
    }
}

impl SuffixLookup for SuffixList {
    fn effective_tld_plus_one(&self, host: &str) -> Result<String> {
        check_host(host)?;
        let domain = self
            .list
            .domain(host.as_bytes())
            .ok_or_else(|| DomainerError::unrecognized(host))?;
        Ok(String::from_utf8_lossy(domain.as_bytes()).into_owned())
    }
}
