//! A11y-Scout: crawl frontier filtering for accessibility audits
//!
//! This crate decides, for every link an accessibility crawler discovers,
//! whether it is a page already seen, whether the site's robots.txt forbids
//! it, and whether the operator's include/exclude patterns permit it.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for A11y-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// The link could not be resolved against the base URL.
    ///
    /// Crawlers drop the offending link; this is never fatal to a crawl.
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for A11y-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Admission, CrawlFilter, Frontier, RejectReason};
pub use robots::{is_disallowed, RobotsRule, RobotsRuleSet};
pub use url::{canonicalize, evaluate_policy, match_glob, GlobPattern, PatternPolicy};
