//! Delimiter-driven segmentation stages.
//!
//! Each stage takes the remainder left by the previous one and returns the
//! extracted segment alongside the new remainder. Every search is for the
//! first occurrence of its delimiter, and the stages must run in the order
//! `split_protocol`, `split_path`, `split_credentials`, `split_port`,
//! `split_query`, `split_fragment`.

use tracing::trace;

use super::error::{DomainerError, Result};

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Username and password carried before the `@` of the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Strips a literal `http://` or `https://` prefix.
///
/// Returns the recognized protocol (empty when neither prefix matched) and
/// the rest of the input. No default protocol is ever injected.
pub fn split_protocol(input: &str) -> (&'static str, &str) {
    if let Some(rest) = input.strip_prefix(HTTP_PREFIX) {
        ("http", rest)
    } else if let Some(rest) = input.strip_prefix(HTTPS_PREFIX) {
        ("https", rest)
    } else {
        ("", input)
    }
}

/// Splits at the first `/` into the authority and the path-bearing tail.
///
/// The tail keeps its leading `/` and is empty when there is no slash.
pub fn split_path(rest: &str) -> (&str, &str) {
    match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    }
}

/// Splits credentials off the authority at the first `@`.
///
/// Within the credentials the first `:` separates username from password.
pub fn split_credentials(authority: &str) -> (Option<Credentials<'_>>, &str) {
    match authority.split_once('@') {
        Some((credentials, host_port)) => {
            let credentials = match credentials.split_once(':') {
                Some((username, password)) => Credentials { username, password },
                None => Credentials {
                    username: credentials,
                    password: "",
                },
            };
            (Some(credentials), host_port)
        }
        None => (None, authority),
    }
}

/// Splits the host from the port at the first `:` and parses the port.
///
/// A missing port yields 0. Any port text that does not parse as a
/// base-10 integer, including an empty one, is a [`DomainerError::MalformedPort`].
pub fn split_port(host_port: &str) -> Result<(&str, i64)> {
    let Some((host, port_text)) = host_port.split_once(':') else {
        return Ok((host_port, 0));
    };

    let port = port_text
        .parse::<i64>()
        .map_err(|source| DomainerError::MalformedPort {
            text: port_text.to_owned(),
            source,
        })?;
    trace!(host, port, "Split port from host");

    Ok((host, port))
}

/// Splits the tail at the first `?` into the path and the
/// query-and-fragment tail, which keeps its leading `?`.
pub fn split_query(tail: &str) -> (&str, &str) {
    match tail.find('?') {
        Some(index) => tail.split_at(index),
        None => (tail, ""),
    }
}

/// Splits the query-and-fragment tail at the first `#`.
///
/// The returned fragment has the `#` removed.
pub fn split_fragment(query_tail: &str) -> (&str, &str) {
    query_tail.split_once('#').unwrap_or((query_tail, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_prefixes() {
        assert_eq!(split_protocol("http://example.com"), ("http", "example.com"));
        assert_eq!(split_protocol("https://example.com"), ("https", "example.com"));
        assert_eq!(split_protocol("example.com"), ("", "example.com"));
        // Only literal lowercase prefixes are recognized
        assert_eq!(split_protocol("ftp://example.com"), ("", "ftp://example.com"));
        assert_eq!(split_protocol("HTTP://example.com"), ("", "HTTP://example.com"));
    }

    #[test]
    fn test_only_one_prefix_is_stripped() {
        assert_eq!(
            split_protocol("http://https://example.com"),
            ("http", "https://example.com")
        );
    }

    #[test]
    fn test_path_split_keeps_slash() {
        assert_eq!(split_path("example.com/a/b"), ("example.com", "/a/b"));
        assert_eq!(split_path("example.com"), ("example.com", ""));
        assert_eq!(split_path("example.com/"), ("example.com", "/"));
    }

    #[test]
    fn test_credentials_variants() {
        let (creds, rest) = split_credentials("user:pass@example.com");
        assert_eq!(creds, Some(Credentials { username: "user", password: "pass" }));
        assert_eq!(rest, "example.com");

        let (creds, _) = split_credentials("user:@example.com");
        assert_eq!(creds, Some(Credentials { username: "user", password: "" }));

        let (creds, rest) = split_credentials("user@example.com:80");
        assert_eq!(creds, Some(Credentials { username: "user", password: "" }));
        assert_eq!(rest, "example.com:80");

        assert_eq!(split_credentials("example.com"), (None, "example.com"));
    }

    #[test]
    fn test_credentials_split_on_first_at() {
        // A password containing '@' is mis-split; the rest lands in the host
        let (creds, rest) = split_credentials("user:p@ss@example.com");
        assert_eq!(creds, Some(Credentials { username: "user", password: "p" }));
        assert_eq!(rest, "ss@example.com");
    }

    #[test]
    fn test_port_parsing() {
        assert_eq!(split_port("example.com:8080").unwrap(), ("example.com", 8080));
        assert_eq!(split_port("example.com").unwrap(), ("example.com", 0));
        assert_eq!(split_port("example.com:0").unwrap(), ("example.com", 0));
    }

    #[test]
    fn test_malformed_port() {
        for input in ["example.com:http", "example.com:", "example.com:80:90"] {
            match split_port(input) {
                Err(DomainerError::MalformedPort { .. }) => {}
                other => panic!("expected MalformedPort for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_query_and_fragment_split() {
        let (path, rest) = split_query("/search?q=1#top");
        assert_eq!(path, "/search");
        assert_eq!(rest, "?q=1#top");
        assert_eq!(split_fragment(rest), ("?q=1", "top"));

        assert_eq!(split_query("/search"), ("/search", ""));
        assert_eq!(split_fragment("?q=1"), ("?q=1", ""));
        assert_eq!(split_fragment("?#a#b"), ("?", "a#b"));
    }
}
