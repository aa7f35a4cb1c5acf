use serde::{Deserialize, Serialize};
use tracing::trace;

/// A key-value pair from a URL query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(&str, &str)> for QueryParam {
    fn from((key, value): (&str, &str)) -> Self {
        QueryParam::new(key, value)
    }
}

/// Parses a raw query string into ordered key-value pairs.
///
/// One leading `?` is stripped. Parts are separated by `&` and only parts
/// containing exactly one `=` are kept; everything else is dropped. Values
/// are not percent-decoded.
pub fn parse_query_string(query: &str) -> Vec<QueryParam> {
    if query.is_empty() {
        return Vec::new();
    }

    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter_map(|part| {
            let mut pieces = part.split('=');
            match (pieces.next(), pieces.next(), pieces.next()) {
                (Some(key), Some(value), None) => Some(QueryParam::new(key, value)),
                _ => {
                    trace!(part, "Dropping malformed query part");
                    None
                }
            }
        })
        .collect()
}
