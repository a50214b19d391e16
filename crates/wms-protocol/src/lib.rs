//! WMS-style tile request decoding.
//!
//! The stages here are pure functions of the request target:
//! - percent-decoding of the raw path + query
//! - path validation
//! - key/value query parsing with typed accessors

pub mod decode;
pub mod path;
pub mod query;

pub use decode::{decode_target, percent_decode, DecodeError};
pub use path::{validate_path, PathVerdict, RequestTarget};
pub use query::WmsQuery;
