//! Request path validation.

use tracing::debug;
use wms_common::{WmsError, WmsResult};

/// Browsers ask for this on their own; it is never a tile request.
const FAVICON_PATH: &str = "/favicon.ico";

/// A decoded request target split at its first `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTarget<'a> {
    pub path: &'a str,
    pub query: &'a str,
}

impl<'a> RequestTarget<'a> {
    /// Split a decoded target into path and query.
    ///
    /// Without a `?` the query is empty.
    pub fn split(decoded: &'a str) -> Self {
        match decoded.split_once('?') {
            Some((path, query)) => Self { path, query },
            None => Self {
                path: decoded,
                query: "",
            },
        }
    }
}

/// Outcome of validating a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVerdict<'a> {
    /// The path ends in `/`: answer with the ready message and stop.
    Ready,
    /// The path is acceptable; the target carries the query to parse.
    Accept(RequestTarget<'a>),
}

/// Validate a decoded request target.
///
/// Rejects an empty target, one not starting with `/`, any target containing
/// `..`, and a path of exactly `/favicon.ico`. A path ending in `/` is a
/// ready probe regardless of any query after it.
pub fn validate_path(decoded: &str) -> WmsResult<PathVerdict<'_>> {
    if decoded.is_empty() || !decoded.starts_with('/') || decoded.contains("..") {
        debug!(request_target = decoded, "Rejecting request path");
        return Err(WmsError::BadPath(decoded.to_string()));
    }

    let target = RequestTarget::split(decoded);

    if target.path == FAVICON_PATH {
        return Err(WmsError::BadPath(decoded.to_string()));
    }

    if target.path.ends_with('/') {
        return Ok(PathVerdict::Ready);
    }

    Ok(PathVerdict::Accept(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_query() {
        let target = RequestTarget::split("/tile?width=1&height=2");
        assert_eq!(target.path, "/tile");
        assert_eq!(target.query, "width=1&height=2");
    }

    #[test]
    fn test_split_first_question_mark_only() {
        let target = RequestTarget::split("/tile?a=1?b=2");
        assert_eq!(target.path, "/tile");
        assert_eq!(target.query, "a=1?b=2");
    }

    #[test]
    fn test_split_without_query() {
        let target = RequestTarget::split("/tile");
        assert_eq!(target.path, "/tile");
        assert_eq!(target.query, "");
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(matches!(validate_path("/../etc"), Err(WmsError::BadPath(_))));
        assert!(validate_path("/tile/..").is_err());
    }

    #[test]
    fn test_rejects_favicon() {
        assert!(validate_path("/favicon.ico").is_err());
    }

    #[test]
    fn test_rejects_empty_and_relative() {
        assert!(validate_path("").is_err());
        assert!(validate_path("tile?width=1").is_err());
    }

    #[test]
    fn test_trailing_slash_is_ready() {
        assert_eq!(validate_path("/").unwrap(), PathVerdict::Ready);
        assert_eq!(validate_path("/wms/").unwrap(), PathVerdict::Ready);
    }

    #[test]
    fn test_trailing_slash_ignores_query() {
        assert_eq!(
            validate_path("/?width=256&height=256").unwrap(),
            PathVerdict::Ready
        );
    }

    #[test]
    fn test_accepts_tile_path() {
        match validate_path("/tile?width=256").unwrap() {
            PathVerdict::Accept(target) => {
                assert_eq!(target.path, "/tile");
                assert_eq!(target.query, "width=256");
            }
            PathVerdict::Ready => panic!("expected an accepted target"),
        }
    }
}
