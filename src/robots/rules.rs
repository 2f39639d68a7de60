//! Robots.txt disallow rule matching
//!
//! Rules are classified once, when a rule set is built: a rule without `*`
//! is a plain path prefix, a rule with `*` is compiled to a regex anchored
//! at the start of the request's path and query.

use crate::url::{path_and_query, wildcard_to_regex};
use crate::UrlError;
use regex::Regex;
use url::Url;

/// A single compiled disallow rule
#[derive(Debug, Clone)]
pub enum RobotsRule {
    /// Blocks every path that starts with this string.
    ///
    /// Matching is plain string prefix, not path-segment aware, so `/admin`
    /// also blocks `/administration`.
    Literal(String),

    /// Blocks every path+query the compiled wildcard matches from its start.
    Wildcard(Regex),
}

impl RobotsRule {
    /// Classifies and compiles a raw disallow value
    pub fn parse(rule: &str) -> Result<Self, UrlError> {
        if rule.contains('*') {
            Ok(Self::Wildcard(wildcard_rule_to_matcher(rule)?))
        } else {
            Ok(Self::Literal(rule.to_string()))
        }
    }

    /// Checks whether this rule blocks the given URL
    pub fn matches(&self, url: &Url) -> bool {
        match self {
            Self::Literal(prefix) => url.path().starts_with(prefix.as_str()),
            Self::Wildcard(regex) => regex.is_match(&path_and_query(url)),
        }
    }
}

/// Compiles a wildcard disallow rule into a matcher
///
/// Each `*` matches any run of characters, including none. Everything
/// else is literal, so `?` only matches a literal `?`: the rule `/*?`
/// blocks any path that carries a query string. The match is anchored at
/// the start of the tested path+query only; a trailing `$` is not treated
/// as an end anchor.
///
/// # Examples
///
/// ```
/// use a11y_scout::robots::wildcard_rule_to_matcher;
///
/// let matcher = wildcard_rule_to_matcher("/*?").unwrap();
/// assert!(matcher.is_match("/page?x=1"));
/// assert!(!matcher.is_match("/page"));
/// ```
pub fn wildcard_rule_to_matcher(rule: &str) -> Result<Regex, UrlError> {
    Ok(Regex::new(&format!("^{}", wildcard_to_regex(rule)))?)
}

/// The disallow rules in effect for one origin
///
/// Built once per crawl session (or per origin) and never mutated; share it
/// between workers behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RobotsRuleSet {
    rules: Vec<RobotsRule>,
}

impl RobotsRuleSet {
    /// Builds a rule set from raw disallow values
    ///
    /// Empty values are skipped: in robots.txt an empty `Disallow:` allows
    /// everything. A wildcard rule that fails to compile is logged and
    /// skipped.
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                if raw.is_empty() {
                    return None;
                }
                match RobotsRule::parse(raw) {
                    Ok(rule) => Some(rule),
                    Err(e) => {
                        tracing::warn!("Skipping robots.txt rule '{}': {}", raw, e);
                        None
                    }
                }
            })
            .collect();

        Self { rules }
    }

    /// A rule set that disallows nothing
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checks whether any rule blocks the URL
    pub fn is_disallowed(&self, url: &Url) -> bool {
        self.rules.iter().any(|rule| rule.matches(url))
    }

    /// Returns the compiled rules
    pub fn rules(&self) -> &[RobotsRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Checks whether robots.txt rules forbid crawling a URL
///
/// Returns `true` on the first matching rule; there is no precedence
/// between rules and `Allow` lines play no part.
pub fn is_disallowed(url: &Url, rules: &RobotsRuleSet) -> bool {
    rules.is_disallowed(url)
}
