//! Link admission for the crawl frontier
//!
//! Every discovered link passes through the same gates, in order:
//! canonicalization, scheme, origin, robots.txt, operator patterns.

use crate::config::CrawlerConfig;
use crate::robots::RobotsRuleSet;
use crate::url::{canonicalize, same_origin, PatternPolicy};
use crate::UrlError;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Why a link was kept out of the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The link could not be resolved against the base URL
    InvalidUrl,
    /// Not an http or https link (mailto:, javascript:, ...)
    UnsupportedScheme,
    /// Points away from the audited origin
    OffOrigin,
    /// Blocked by the site's robots.txt
    RobotsDisallowed,
    /// Matched an operator exclude pattern
    ExcludedByPattern,
    /// Matched none of the operator include patterns
    NotIncluded,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid-url",
            Self::UnsupportedScheme => "unsupported-scheme",
            Self::OffOrigin => "off-origin",
            Self::RobotsDisallowed => "robots-disallowed",
            Self::ExcludedByPattern => "excluded",
            Self::NotIncluded => "not-included",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running a link through the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The canonical URL may enter the frontier
    Admit(Url),
    /// The link is dropped; `url` is the canonical form when one exists
    Reject {
        url: Option<Url>,
        reason: RejectReason,
    },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit(_))
    }

    /// Returns the canonical URL, admitted or not
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Admit(url) => Some(url),
            Self::Reject { url, .. } => url.as_ref(),
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Admit(_) => None,
            Self::Reject { reason, .. } => Some(*reason),
        }
    }
}

/// Immutable per-session crawl policy
///
/// Holds no mutable state, so one filter can be shared by every crawl
/// worker behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct CrawlFilter {
    base: Url,
    keep_query: bool,
    same_origin_only: bool,
    robots: Option<Arc<RobotsRuleSet>>,
    patterns: PatternPolicy,
}

impl CrawlFilter {
    /// Builds a filter from the crawler configuration
    ///
    /// `robots` is ignored when `respect_robots_txt` is off.
    pub fn new(
        base: Url,
        config: &CrawlerConfig,
        robots: Arc<RobotsRuleSet>,
    ) -> Result<Self, UrlError> {
        let patterns = PatternPolicy::new(&config.include_patterns, &config.exclude_patterns)?;

        Ok(Self {
            base,
            keep_query: config.keep_query,
            same_origin_only: config.same_origin_only,
            robots: config.respect_robots_txt.then_some(robots),
            patterns,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Canonicalizes a link without applying any gate
    pub fn canonicalize(&self, raw: &str) -> Result<Url, UrlError> {
        canonicalize(&self.base, self.keep_query, raw)
    }

    /// Runs a discovered link through every gate
    pub fn admit(&self, raw: &str) -> Admission {
        let url = match self.canonicalize(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Dropping link: {}", e);
                return Admission::Reject {
                    url: None,
                    reason: RejectReason::InvalidUrl,
                };
            }
        };

        match self.check(&url) {
            Some(reason) => {
                tracing::debug!("Rejected {} ({})", url, reason);
                Admission::Reject {
                    url: Some(url),
                    reason,
                }
            }
            None => Admission::Admit(url),
        }
    }

    fn check(&self, url: &Url) -> Option<RejectReason> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Some(RejectReason::UnsupportedScheme);
        }

        if self.same_origin_only && !same_origin(&self.base, url) {
            return Some(RejectReason::OffOrigin);
        }

        if let Some(robots) = &self.robots {
            if robots.is_disallowed(url) {
                return Some(RejectReason::RobotsDisallowed);
            }
        }

        if self.patterns.is_excluded(url.as_str()) {
            return Some(RejectReason::ExcludedByPattern);
        }

        if self.patterns.is_not_included(url.as_str()) {
            return Some(RejectReason::NotIncluded);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CrawlerConfig {
        CrawlerConfig::default()
    }

    fn filter_with(config: &CrawlerConfig, robots: &[&str]) -> CrawlFilter {
        CrawlFilter::new(
            Url::parse("https://example.com").unwrap(),
            config,
            Arc::new(RobotsRuleSet::new(robots.iter().copied())),
        )
        .unwrap()
    }

    fn reason(filter: &CrawlFilter, raw: &str) -> Option<RejectReason> {
        filter.admit(raw).reason()
    }

    #[test]
    fn test_admits_canonical_url() {
        let filter = filter_with(&config(), &[]);
        let admission = filter.admit("/about/#team");
        assert!(admission.is_admitted());
        assert_eq!(admission.url().unwrap().as_str(), "https://example.com/about");
    }

    #[test]
    fn test_invalid_link_rejected_not_fatal() {
        let filter = filter_with(&config(), &[]);
        let admission = filter.admit("http://[broken");
        assert_eq!(admission.reason(), Some(RejectReason::InvalidUrl));
        assert!(admission.url().is_none());
    }

    #[test]
    fn test_unsupported_scheme() {
        let filter = filter_with(&config(), &[]);
        assert_eq!(
            reason(&filter, "mailto:a11y@example.com"),
            Some(RejectReason::UnsupportedScheme)
        );
        assert_eq!(
            reason(&filter, "javascript:void(0)"),
            Some(RejectReason::UnsupportedScheme)
        );
    }

    #[test]
    fn test_off_origin() {
        let filter = filter_with(&config(), &[]);
        assert_eq!(
            reason(&filter, "https://other.org/page"),
            Some(RejectReason::OffOrigin)
        );

        let mut cfg = config();
        cfg.same_origin_only = false;
        let filter = filter_with(&cfg, &[]);
        assert!(filter.admit("https://other.org/page").is_admitted());
    }

    #[test]
    fn test_robots_gate() {
        let filter = filter_with(&config(), &["/admin", "/*?"]);
        assert_eq!(reason(&filter, "/admin/users"), Some(RejectReason::RobotsDisallowed));
        assert_eq!(reason(&filter, "/administration"), Some(RejectReason::RobotsDisallowed));
        assert!(filter.admit("/about").is_admitted());
    }

    #[test]
    fn test_robots_query_rule_sees_kept_query_only() {
        // Without keep-query the query is stripped before robots matching
        let filter = filter_with(&config(), &["/*?"]);
        assert!(filter.admit("/page?x=1").is_admitted());

        let mut cfg = config();
        cfg.keep_query = true;
        let filter = filter_with(&cfg, &["/*?"]);
        assert_eq!(reason(&filter, "/page?x=1"), Some(RejectReason::RobotsDisallowed));
        assert!(filter.admit("/page").is_admitted());
    }

    #[test]
    fn test_robots_ignored_when_disabled() {
        let mut cfg = config();
        cfg.respect_robots_txt = false;
        let filter = filter_with(&cfg, &["/"]);
        assert!(filter.admit("/admin").is_admitted());
    }

    #[test]
    fn test_pattern_gates() {
        let mut cfg = config();
        cfg.include_patterns = vec!["*/about/*".to_string()];
        cfg.exclude_patterns = vec!["*/about/private/*".to_string()];
        let filter = filter_with(&cfg, &[]);

        assert!(filter.admit("/about/team").is_admitted());
        assert_eq!(
            reason(&filter, "/about/private/roadmap"),
            Some(RejectReason::ExcludedByPattern)
        );
        assert_eq!(reason(&filter, "/contact"), Some(RejectReason::NotIncluded));
    }

    #[test]
    fn test_robots_checked_before_patterns() {
        let mut cfg = config();
        cfg.exclude_patterns = vec!["*/admin*".to_string()];
        let filter = filter_with(&cfg, &["/admin"]);
        assert_eq!(reason(&filter, "/admin"), Some(RejectReason::RobotsDisallowed));
    }

    #[test]
    fn test_filter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CrawlFilter>();
    }
}
