use serde::Deserialize;

/// Main configuration structure for A11y-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// The site under audit
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute URL that relative links resolve against
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Crawl frontier policy
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Skip URLs disallowed by the site's robots.txt
    #[serde(default = "default_true")]
    pub respect_robots_txt: bool,

    /// Treat URLs differing only by query string as distinct pages
    #[serde(default)]
    pub keep_query: bool,

    /// Only admit URLs on the base URL's origin
    #[serde(default = "default_true")]
    pub same_origin_only: bool,

    /// Maximum link depth from the base URL
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of distinct pages admitted to the frontier
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Glob patterns a URL must match one of (empty admits all)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Glob patterns that reject a URL, overriding includes
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            respect_robots_txt: true,
            keep_query: false,
            same_origin_only: true,
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> u32 {
    5
}

fn default_max_pages() -> usize {
    500
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler, also the token matched against robots.txt groups
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn user_agent_string(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}
