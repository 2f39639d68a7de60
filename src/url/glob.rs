use crate::UrlError;
use regex::Regex;

/// A compiled wildcard pattern matched against an entire URL string
///
/// `*` matches any run of characters, including none. Every other
/// character, regex metacharacters included, matches only itself. The
/// pattern must cover the whole candidate: `*/about/*` matches
/// `https://example.com/about/team` but not `https://example.com/aboutus`.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern
    ///
    /// Any string is a valid glob; an error is only possible when the
    /// pattern is too large for the regex engine.
    pub fn new(pattern: &str) -> Result<Self, UrlError> {
        let body = wildcard_to_regex(pattern);
        let regex = Regex::new(&format!("^{}$", body))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns the pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks whether `candidate` matches this pattern from start to end
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// Translates a `*` wildcard string into an unanchored regex body
///
/// Shared with robots.txt wildcard rules, which anchor only the start.
pub(crate) fn wildcard_to_regex(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("(?s){}", body)
}

/// Checks if a URL matches a glob pattern
///
/// Compiles the pattern on every call; hold a [`GlobPattern`] when the same
/// pattern is tested repeatedly.
///
/// # Examples
///
/// ```
/// use a11y_scout::url::match_glob;
///
/// assert!(match_glob("https://example.com/about/team", "*/about/*"));
/// assert!(!match_glob("https://example.com/aboutus", "*/about/*"));
/// ```
pub fn match_glob(url: &str, pattern: &str) -> bool {
    match GlobPattern::new(pattern) {
        Ok(glob) => glob.is_match(url),
        Err(e) => {
            tracing::warn!("Ignoring glob pattern '{}': {}", pattern, e);
            false
        }
    }
}
