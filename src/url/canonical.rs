use crate::UrlError;
use url::Url;

/// Canonicalizes a discovered link into the crawler's deduplication key
///
/// # Canonicalization Steps
///
/// 1. Resolve `raw` against `base` (relative, protocol-relative and
///    absolute references are all accepted)
/// 2. Remove fragment (everything after #)
/// 3. Remove the query string unless `keep_query` is set; a kept query is
///    left exactly as resolved
/// 4. Remove trailing slashes from the path (except for root /)
///
/// Step 4 trims a whole run of trailing slashes, not exactly one, so that
/// `/a//` and `/a/` both become `/a` and canonicalizing twice is a no-op.
///
/// Host case, percent-encoding and parameter order are left untouched.
///
/// # Arguments
///
/// * `base` - Absolute URL that relative links resolve against
/// * `keep_query` - Whether the query string takes part in deduplication
/// * `raw` - The link as discovered (absolute URL or path)
///
/// # Returns
///
/// * `Ok(Url)` - Canonical URL
/// * `Err(UrlError::InvalidUrl)` - The link cannot be resolved
///
/// # Examples
///
/// ```
/// use url::Url;
/// use a11y_scout::url::canonicalize;
///
/// let base = Url::parse("https://example.com").unwrap();
/// let url = canonicalize(&base, false, "/about/?tab=1#team").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn canonicalize(base: &Url, keep_query: bool, raw: &str) -> Result<Url, UrlError> {
    let mut url = base.join(raw).map_err(|e| UrlError::InvalidUrl {
        input: raw.to_string(),
        reason: e.to_string(),
    })?;

    url.set_fragment(None);

    if !keep_query {
        url.set_query(None);
    }

    // A run of trailing slashes collapses too, otherwise "/a//" would only
    // reach its canonical form after two passes.
    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        url.set_path(&normalized);
    }

    Ok(url)
}
