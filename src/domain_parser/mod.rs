pub mod error;
pub mod parser;
pub mod query;
pub mod resolver;
pub mod segments;
pub mod suffix;


pub use error::DomainerError;
pub use parser::{ParsedUrl, UrlParser};
pub use query::{parse_query_string, QueryParam};
pub use resolver::{HostResolver, SystemResolver};
pub use suffix::{BuiltinSuffixList, SuffixList, SuffixLookup};
