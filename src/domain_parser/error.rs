//! Error types for URL decomposition.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while decomposing a URL.
///
/// Each variant identifies the stage that failed, so callers can decide
/// whether to retry, default or abort.
#[derive(Error, Debug)]
pub enum DomainerError {
    /// The text after the `:` in the authority is not a base-10 integer.
    #[error("malformed port {text:?}: {source}")]
    MalformedPort {
        text: String,
        #[source]
        source: ParseIntError,
    },

    /// No registrable domain could be derived for the host.
    #[error("no registrable domain under a public suffix for host {host:?}")]
    UnrecognizedSuffix { host: String },

    /// The hostname could not be resolved to an address.
    #[error("failed to resolve {host:?}: {source}")]
    ResolutionFailure {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// A custom public suffix list could not be read or parsed.
    #[error("invalid public suffix list {path}: {reason}")]
    InvalidSuffixList { path: String, reason: String },
}

impl DomainerError {
    pub(crate) fn unrecognized(host: &str) -> Self {
        DomainerError::UnrecognizedSuffix {
            host: host.to_owned(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainerError>;
