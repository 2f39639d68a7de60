use crate::url::glob::{match_glob, GlobPattern};
use crate::UrlError;

/// Operator include/exclude rules compiled for repeated evaluation
///
/// Exclusion always wins. An empty include list admits everything that
/// is not excluded. Pattern order never changes the outcome.
#[derive(Debug, Clone, Default)]
pub struct PatternPolicy {
    include: Vec<GlobPattern>,
    exclude: Vec<GlobPattern>,
}

impl PatternPolicy {
    /// Compiles include and exclude glob lists
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, UrlError> {
        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    /// A policy with no patterns, which admits every URL
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Returns true when the policy admits `url`
    pub fn evaluate(&self, url: &str) -> bool {
        if self.exclude.iter().any(|glob| glob.is_match(url)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|glob| glob.is_match(url))
    }

    /// Returns true when `url` hits an exclude pattern
    pub fn is_excluded(&self, url: &str) -> bool {
        self.exclude.iter().any(|glob| glob.is_match(url))
    }

    /// Returns true when an include list is configured and `url` misses it
    pub fn is_not_included(&self, url: &str) -> bool {
        !self.include.is_empty() && !self.include.iter().any(|glob| glob.is_match(url))
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<GlobPattern>, UrlError> {
    patterns
        .iter()
        .map(|p| GlobPattern::new(p.as_ref()))
        .collect()
}

/// Decides whether operator patterns admit a URL
///
/// # Evaluation Order
///
/// 1. Exclusion: any matching exclude pattern rejects the URL
/// 2. Inclusion: with a non-empty include list, at least one pattern must
///    match; with an empty one the URL is admitted
///
/// # Examples
///
/// ```
/// use a11y_scout::url::evaluate_policy;
///
/// let include = ["*/about/*"];
/// let exclude = ["*/about/private/*"];
/// assert!(evaluate_policy("https://example.com/about/team", &include, &exclude));
/// assert!(!evaluate_policy("https://example.com/about/private/roadmap", &include, &exclude));
/// ```
pub fn evaluate_policy<S: AsRef<str>>(url: &str, include: &[S], exclude: &[S]) -> bool {
    if exclude.iter().any(|p| match_glob(url, p.as_ref())) {
        return false;
    }

    include.is_empty() || include.iter().any(|p| match_glob(url, p.as_ref()))
}
