//! Robots.txt handling module
//!
//! This module provides disallow-rule matching plus fetching, parsing, and
//! caching of robots.txt files.

mod cache;
mod parser;
mod rules;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::ParsedRobots;
pub use rules::{is_disallowed, wildcard_rule_to_matcher, RobotsRule, RobotsRuleSet};

use crate::ScoutError;
use reqwest::Client;
use url::Url;

/// Fetches and parses robots.txt for the origin of `site`
///
/// # Status Handling
///
/// | Response | Result |
/// |----------|--------|
/// | 2xx | Body parsed |
/// | 4xx | Allow all |
/// | 5xx / other | Allow all, logged as a warning |
/// | Transport error | `Err(ScoutError::Http)` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `site` - Any URL on the site; only its origin is used
pub async fn fetch_robots(client: &Client, site: &Url) -> Result<ParsedRobots, ScoutError> {
    let robots_url = site.join("/robots.txt")?;

    let response = client
        .get(robots_url.as_str())
        .send()
        .await
        .map_err(|source| ScoutError::Http {
            url: robots_url.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_success() {
        let body = response.text().await.map_err(|source| ScoutError::Http {
            url: robots_url.to_string(),
            source,
        })?;
        tracing::info!("Fetched {} ({} bytes)", robots_url, body.len());
        return Ok(ParsedRobots::from_content(&body));
    }

    if status.is_client_error() {
        tracing::debug!("No robots.txt at {} ({}), allowing all", robots_url, status);
    } else {
        tracing::warn!(
            "Unexpected status {} for {}, allowing all",
            status,
            robots_url
        );
    }

    Ok(ParsedRobots::allow_all())
}
