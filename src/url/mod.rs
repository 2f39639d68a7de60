//! URL handling module for A11y-Scout
//!
//! This module provides link canonicalization, whole-string glob matching,
//! and the include/exclude pattern policy applied to discovered links.

mod canonical;
mod glob;
mod policy;

// Re-export main functions
pub use canonical::canonicalize;
pub use glob::{match_glob, GlobPattern};
pub use policy::{evaluate_policy, PatternPolicy};

pub(crate) use glob::wildcard_to_regex;

use url::Url;

/// Returns the origin of a URL as `scheme://host[:port]`
///
/// URLs without a tuple origin (`data:`, `mailto:` and the like) yield
/// `None`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use a11y_scout::url::extract_origin;
///
/// let url = Url::parse("https://example.com:8443/path?q=1").unwrap();
/// assert_eq!(extract_origin(&url), Some("https://example.com:8443".to_string()));
/// ```
pub fn extract_origin(url: &Url) -> Option<String> {
    let origin = url.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

/// Checks whether two URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    let origin = a.origin();
    origin.is_tuple() && origin == b.origin()
}

/// Returns the path of a URL followed by `?query` when a query is present
///
/// This is the string robots.txt wildcard rules are tested against.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
