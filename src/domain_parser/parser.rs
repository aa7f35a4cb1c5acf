use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::error::{DomainerError, Result};
use super::query::{parse_query_string, QueryParam};
use super::resolver::{HostResolver, SystemResolver};
use super::segments::{
    split_credentials, split_fragment, split_path, split_port, split_protocol, split_query,
};
use super::suffix::{BuiltinSuffixList, SuffixLookup};

/// A URL or bare domain split into its parts.
///
/// Every field is populated by a single parse; a failed parse never yields
/// a partially filled record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    /// The input exactly as given, e.g. "https://www.example.com:443/search?q=hello+world#test"
    pub full_input: String,
    /// "http", "https" or empty when no literal prefix was present
    pub protocol: String,
    pub username: String,
    pub password: String,
    /// Labels left of the registrable domain, e.g. "www"
    pub subdomain: String,
    /// Registrable domain including its suffix, e.g. "example.co.uk"
    pub hostname: String,
    /// The label directly left of the TLD, e.g. "example"
    pub domain: String,
    /// The public suffix, e.g. "com" or "co.uk"
    pub tld: String,
    /// 0 when no port was given
    pub port: i64,
    /// Path including its leading '/'
    pub path: String,
    pub query: Vec<QueryParam>,
    pub fragment: String,
    /// Only set when resolution was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl ParsedUrl {
    /// Parses `url` against the built-in public suffix list.
    pub fn new(url: &str) -> Result<Self> {
        UrlParser::new().parse(url)
    }

    /// Parses `url` and resolves its hostname with the system resolver.
    pub fn resolve(url: &str) -> Result<Self> {
        UrlParser::new().parse_with_resolution(url)
    }

    /// Returns the value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_str())
    }

    /// Host as it appeared in the input: subdomain, domain and TLD joined.
    pub fn host(&self) -> String {
        [&self.subdomain, &self.domain, &self.tld]
            .into_iter()
            .filter(|label| !label.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::str::FromStr for ParsedUrl {
    type Err = DomainerError;

    fn from_str(s: &str) -> Result<Self> {
        ParsedUrl::new(s)
    }
}

/// Host split into its public-suffix aware parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HostParts {
    pub hostname: String,
    pub subdomain: String,
    pub domain: String,
    pub tld: String,
}

/// Splits `host` given its registrable domain as reported by the suffix lookup.
///
/// The TLD is every label of `registrable` after the first. The `.tld`
/// suffix is trimmed from the host; of what remains, the last label is the
/// domain and the labels before it form the subdomain.
pub(crate) fn split_host(host: &str, registrable: String) -> HostParts {
    let tld = registrable
        .split_once('.')
        .map(|(_, tld)| tld.to_owned())
        .unwrap_or_default();

    let without_tld = if tld.is_empty() {
        host
    } else {
        host.strip_suffix(tld.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(host)
    };

    let (subdomain, domain) = without_tld.rsplit_once('.').unwrap_or(("", without_tld));

    HostParts {
        hostname: registrable,
        subdomain: subdomain.to_owned(),
        domain: domain.to_owned(),
        tld,
    }
}

/// Decomposes URLs using an injected suffix lookup and host resolver.
///
/// The parser holds no mutable state, so one instance can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct UrlParser<S = BuiltinSuffixList, R = SystemResolver> {
    suffixes: S,
    resolver: R,
}

impl UrlParser {
    /// Parser backed by the built-in suffix list and the system resolver.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SuffixLookup, R: HostResolver> UrlParser<S, R> {
    pub fn with_parts(suffixes: S, resolver: R) -> Self {
        Self { suffixes, resolver }
    }

    /// Replaces the suffix lookup.
    pub fn with_suffixes<S2: SuffixLookup>(self, suffixes: S2) -> UrlParser<S2, R> {
        UrlParser {
            suffixes,
            resolver: self.resolver,
        }
    }

    /// Replaces the host resolver.
    pub fn with_resolver<R2: HostResolver>(self, resolver: R2) -> UrlParser<S, R2> {
        UrlParser {
            suffixes: self.suffixes,
            resolver,
        }
    }

    /// Splits `raw` into its parts without any network access.
    ///
    /// The delimiters are consumed in a fixed order:
    /// 1. A literal `http://` or `https://` prefix
    /// 2. The first `/`, separating the authority from the path
    /// 3. The first `@` in the authority, separating credentials
    /// 4. The first `:` in what remains, separating the port
    /// 5. The first `?` in the path, then the first `#` after it
    /// 6. The host is split into subdomain, domain and TLD via the suffix lookup
    ///
    /// # Arguments
    /// * `raw` - A URL or bare domain, e.g. "user@example.co.uk:80/a?b=c"
    ///
    /// # Returns
    /// * `Result<ParsedUrl>` - The decomposed input, or
    ///   [`DomainerError::MalformedPort`] when the port does not parse and
    ///   [`DomainerError::UnrecognizedSuffix`] when the host has no
    ///   registrable domain under a public suffix
    #[instrument(level = "trace", skip(self))]
    pub fn parse(&self, raw: &str) -> Result<ParsedUrl> {
        let (protocol, rest) = split_protocol(raw);

        // The path is cut off first so an '@' or ':' inside it is never
        // mistaken for credentials or a port
        let (authority, tail) = split_path(rest);
        let (credentials, host_port) = split_credentials(authority);
        let (host, port) = split_port(host_port)?;

        // A fragment is only recognized after a '?'
        let (path, query_tail) = split_query(tail);
        let (query, fragment) = split_fragment(query_tail);
        let query = parse_query_string(query);

        trace!(protocol, host, port, path, fragment, "Segmented input");

        let registrable = self.suffixes.effective_tld_plus_one(host)?;
        let parts = split_host(host, registrable);

        let credentials = credentials.unwrap_or_default();

        Ok(ParsedUrl {
            full_input: raw.to_owned(),
            protocol: protocol.to_owned(),
            username: credentials.username.to_owned(),
            password: credentials.password.to_owned(),
            subdomain: parts.subdomain,
            hostname: parts.hostname,
            domain: parts.domain,
            tld: parts.tld,
            port,
            path: path.to_owned(),
            query,
            fragment: fragment.to_owned(),
            ip_address: None,
        })
    }

    /// Like [`UrlParser::parse`], then resolves the registrable hostname and
    /// records the first address returned.
    ///
    /// # Arguments
    /// * `raw` - A URL or bare domain
    ///
    /// # Returns
    /// * `Result<ParsedUrl>` - The decomposed input with `ip_address` set, or
    ///   [`DomainerError::ResolutionFailure`] when the resolver fails or
    ///   returns no addresses
    #[instrument(level = "debug", skip(self))]
    pub fn parse_with_resolution(&self, raw: &str) -> Result<ParsedUrl> {
        let mut parsed = self.parse(raw)?;
        parsed.ip_address = Some(self.resolve_first(&parsed.hostname)?);
        Ok(parsed)
    }

    fn resolve_first(&self, hostname: &str) -> Result<String> {
        let failure = |source: std::io::Error| DomainerError::ResolutionFailure {
            host: hostname.to_owned(),
            source,
        };

        let addresses = self.resolver.resolve(hostname).map_err(failure)?;
        let first = addresses.first().ok_or_else(|| {
            failure(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no addresses returned",
            ))
        })?;

        debug!(hostname, ip = %first, "Using first resolved address");
        Ok(first.to_string())
    }
}
