//! Robots.txt caching implementation
//!
//! Each origin's robots.txt is parsed once and turned into an immutable rule
//! set for our user agent. Workers receive `Arc` snapshots, so replacing a
//! stale entry never changes a set another worker is matching against.

use crate::robots::{ParsedRobots, RobotsRuleSet};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Cached robots.txt data for an origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The parsed robots.txt content
    pub content: ParsedRobots,

    /// Disallow rules compiled for the crawler's user agent
    pub rules: Arc<RobotsRuleSet>,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new CachedRobots instance stamped with the current time
    pub fn new(content: ParsedRobots, user_agent: &str) -> Self {
        let rules = Arc::new(content.rules_for(user_agent));
        Self {
            content,
            rules,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the cached robots.txt is stale (older than 24 hours)
    pub fn is_stale(&self) -> bool {
        self.age() > Duration::hours(24)
    }

    /// Returns how long ago the robots.txt was fetched
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}

/// Per-origin robots.txt cache
#[derive(Debug, Default)]
pub struct RobotsCache {
    user_agent: String,
    entries: HashMap<String, CachedRobots>,
}

impl RobotsCache {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            entries: HashMap::new(),
        }
    }

    /// Stores a freshly fetched robots.txt for an origin and returns its rules
    pub fn insert(&mut self, origin: &str, content: ParsedRobots) -> Arc<RobotsRuleSet> {
        let cached = CachedRobots::new(content, &self.user_agent);
        let rules = Arc::clone(&cached.rules);
        self.entries.insert(origin.to_string(), cached);
        tracing::debug!("Cached robots.txt for {} ({} rules)", origin, rules.len());
        rules
    }

    /// Returns the rule snapshot for an origin, or `None` if missing or stale
    pub fn rules(&self, origin: &str) -> Option<Arc<RobotsRuleSet>> {
        self.entries
            .get(origin)
            .filter(|cached| !cached.is_stale())
            .map(|cached| Arc::clone(&cached.rules))
    }

    /// Gets the crawl delay recorded for an origin, if any
    pub fn crawl_delay(&self, origin: &str) -> Option<f64> {
        self.entries
            .get(origin)
            .and_then(|cached| cached.content.crawl_delay(&self.user_agent))
    }

    /// Returns the cache entry for an origin, stale or not
    pub fn get(&self, origin: &str) -> Option<&CachedRobots> {
        self.entries.get(origin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const ORIGIN: &str = "https://example.com";

    #[test]
    fn test_new_cache_not_stale() {
        let cache = CachedRobots::new(ParsedRobots::allow_all(), "TestBot");
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_cache_is_stale() {
        let mut cache = CachedRobots::new(ParsedRobots::allow_all(), "TestBot");

        // Manually set fetched_at to 25 hours ago
        cache.fetched_at = Utc::now() - Duration::hours(25);

        assert!(cache.is_stale());
    }

    #[test]
    fn test_cache_not_stale_at_23_hours() {
        let mut cache = CachedRobots::new(ParsedRobots::allow_all(), "TestBot");
        cache.fetched_at = Utc::now() - Duration::hours(23);
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_age() {
        let mut cache = CachedRobots::new(ParsedRobots::allow_all(), "TestBot");
        cache.fetched_at = Utc::now() - Duration::hours(12);

        let age = cache.age();
        // Allow some tolerance for test execution time
        assert!(age.num_hours() >= 11 && age.num_hours() <= 13);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut cache = RobotsCache::new("TestBot");
        assert!(cache.rules(ORIGIN).is_none());

        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /admin\nCrawl-delay: 3");
        let inserted = cache.insert(ORIGIN, robots);
        let looked_up = cache.rules(ORIGIN).unwrap();

        assert!(Arc::ptr_eq(&inserted, &looked_up));
        assert!(looked_up.is_disallowed(&Url::parse("https://example.com/admin").unwrap()));
        assert_eq!(cache.crawl_delay(ORIGIN), Some(3.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_entry_not_served() {
        let mut cache = RobotsCache::new("TestBot");
        cache.insert(ORIGIN, ParsedRobots::allow_all());
        cache.entries.get_mut(ORIGIN).unwrap().fetched_at = Utc::now() - Duration::hours(25);

        assert!(cache.rules(ORIGIN).is_none());
        assert!(cache.get(ORIGIN).unwrap().is_stale());
    }

    #[test]
    fn test_replacing_entry_keeps_old_snapshot() {
        let mut cache = RobotsCache::new("TestBot");
        let old = cache.insert(ORIGIN, ParsedRobots::from_content("User-agent: *\nDisallow: /a"));
        let new = cache.insert(ORIGIN, ParsedRobots::from_content("User-agent: *\nDisallow: /b"));

        let a = Url::parse("https://example.com/a").unwrap();
        assert!(old.is_disallowed(&a));
        assert!(!new.is_disallowed(&a));
    }
}
