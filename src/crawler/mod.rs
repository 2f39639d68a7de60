//! Crawler-facing policy surface
//!
//! This module contains what the crawl loop calls between fetches:
//! - Link admission through canonicalization, robots.txt and pattern gates
//! - The deduplicating frontier queue
//! - HTTP client construction for robots.txt retrieval

mod fetcher;
mod filter;
mod frontier;

pub use fetcher::build_http_client;
pub use filter::{Admission, CrawlFilter, RejectReason};
pub use frontier::{Frontier, QueuedUrl};

use crate::config::Config;
use crate::robots::{fetch_robots, RobotsCache, RobotsRuleSet};
use crate::url::extract_origin;
use crate::{ScoutError, UrlError};
use std::sync::Arc;
use url::Url;

/// Builds the crawl filter for a session
///
/// When `respect-robots-txt` is on and a `robots_cache` is given, the base
/// origin's rules come from the cache, fetching robots.txt only when the
/// entry is missing or stale. Without a cache no robots rules apply.
///
/// # Returns
///
/// * `Ok(CrawlFilter)` - Ready to share between crawl workers
/// * `Err(ScoutError)` - Bad base URL, pattern, or robots.txt transport failure
pub async fn build_filter(
    config: &Config,
    robots_cache: Option<&mut RobotsCache>,
) -> Result<CrawlFilter, ScoutError> {
    let base = Url::parse(&config.site.base_url)?;

    let rules = match robots_cache {
        Some(cache) if config.crawler.respect_robots_txt => {
            robots_rules(config, &base, cache).await?
        }
        _ => Arc::new(RobotsRuleSet::allow_all()),
    };

    tracing::info!(
        "Crawl filter for {}: {} robots rules, {} include / {} exclude patterns",
        base,
        rules.len(),
        config.crawler.include_patterns.len(),
        config.crawler.exclude_patterns.len()
    );

    Ok(CrawlFilter::new(base, &config.crawler, rules)?)
}

/// Returns the cached rule snapshot for the base origin, fetching if needed
async fn robots_rules(
    config: &Config,
    base: &Url,
    cache: &mut RobotsCache,
) -> Result<Arc<RobotsRuleSet>, ScoutError> {
    let origin = extract_origin(base).ok_or_else(|| UrlError::InvalidUrl {
        input: base.to_string(),
        reason: "base URL has no origin".to_string(),
    })?;

    if let Some(rules) = cache.rules(&origin) {
        tracing::debug!("Using cached robots.txt for {}", origin);
        return Ok(rules);
    }

    let client = build_http_client(&config.user_agent)?;
    let robots = fetch_robots(&client, base).await?;
    let rules = cache.insert(&origin, robots);

    if let Some(delay) = cache.crawl_delay(&origin) {
        tracing::info!("robots.txt for {} asks for a {}s crawl delay", origin, delay);
    }

    Ok(rules)
}
