//! Splits URLs and bare domains into protocol, credentials, subdomain,
//! registrable domain, public suffix, port, path, query and fragment.
//!
//! ```
//! use domainer::ParsedUrl;
//!
//! let parsed = ParsedUrl::new("https://www.example.co.uk:443/search?q=hello+world#test")?;
//! assert_eq!(parsed.subdomain, "www");
//! assert_eq!(parsed.domain, "example");
//! assert_eq!(parsed.tld, "co.uk");
//! assert_eq!(parsed.port, 443);
//! assert_eq!(parsed.query_value("q"), Some("hello+world"));
//! # Ok::<(), domainer::DomainerError>(())
//! ```

pub mod batch;
pub mod config;
pub mod domain_parser;
pub mod utils;

pub use domain_parser::{
    BuiltinSuffixList, DomainerError, HostResolver, ParsedUrl, QueryParam, SuffixList,
    SuffixLookup, SystemResolver, UrlParser,
};
