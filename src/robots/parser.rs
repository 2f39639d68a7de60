//! Robots.txt parser implementation
//!
//! Tokenizing is done by the robotstxt crate's parser; this module collects
//! what the crawler acts on from its callbacks: `User-agent` groups with
//! their `Disallow` values and `Crawl-delay`. Anything else is ignored.

use crate::robots::RobotsRuleSet;
use robotstxt::{parse_robotstxt, RobotsParseHandler};

/// One `User-agent` group of a robots.txt file
#[derive(Debug, Clone, Default, PartialEq)]
struct Group {
    /// Lowercased product tokens, `*` for the global group
    agents: Vec<String>,
    disallow: Vec<String>,
    crawl_delay: Option<f64>,
}

/// Collects groups from robotstxt parse callbacks
#[derive(Default)]
struct GroupCollector {
    groups: Vec<Group>,
    current: Option<Group>,
    in_rules: bool,
}

impl GroupCollector {
    fn finish(mut self) -> Vec<Group> {
        if let Some(group) = self.current.take() {
            self.groups.push(group);
        }
        self.groups
    }
}

impl RobotsParseHandler for GroupCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, user_agent: &str) {
        // A user-agent line after rules opens a new group
        if self.in_rules {
            if let Some(group) = self.current.take() {
                self.groups.push(group);
            }
            self.in_rules = false;
        }
        self.current
            .get_or_insert_with(Group::default)
            .agents
            .push(product_token(user_agent));
    }

    fn handle_allow(&mut self, _line_num: u32, _value: &str) {
        self.in_rules = true;
    }

    fn handle_disallow(&mut self, _line_num: u32, value: &str) {
        self.in_rules = true;
        // Rules before any user-agent line belong to nobody
        if let Some(group) = self.current.as_mut() {
            if !value.is_empty() {
                group.disallow.push(value.to_string());
            }
        }
    }

    fn handle_sitemap(&mut self, _line_num: u32, _value: &str) {}

    fn handle_unknown_action(&mut self, _line_num: u32, action: &str, value: &str) {
        if !action.trim().eq_ignore_ascii_case("crawl-delay") {
            return;
        }
        self.in_rules = true;
        if let (Some(group), Ok(delay)) = (self.current.as_mut(), value.trim().parse::<f64>()) {
            group.crawl_delay = Some(delay);
        }
    }
}

/// Extracts the lowercased product token from a user agent string
///
/// `Scout/2.0 (+https://scout.example)` yields `scout`; a value starting
/// with `*` yields `*`.
fn product_token(user_agent: &str) -> String {
    let trimmed = user_agent.trim();
    if trimmed.starts_with('*') {
        return "*".to_string();
    }
    trimmed
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Parsed robots.txt data
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    groups: Vec<Group>,
}

impl ParsedRobots {
    /// Parses raw robots.txt content
    ///
    /// Parsing never fails; unknown or malformed lines are skipped.
    pub fn from_content(content: &str) -> Self {
        let mut collector = GroupCollector::default();
        parse_robotstxt(content, &mut collector);
        Self {
            groups: collector.finish(),
        }
    }

    /// A robots.txt with no groups, used when the file is missing
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Returns the groups that apply to `user_agent`
    ///
    /// Groups naming our product token exactly (ignoring case) win over `*`.
    fn groups_for(&self, user_agent: &str) -> Vec<&Group> {
        let token = product_token(user_agent);

        let specific: Vec<&Group> = self
            .groups
            .iter()
            .filter(|g| g.agents.iter().any(|a| a != "*" && *a == token))
            .collect();

        if !specific.is_empty() {
            return specific;
        }

        self.groups
            .iter()
            .filter(|g| g.agents.iter().any(|a| a == "*"))
            .collect()
    }

    /// Builds the disallow rule set for a user agent
    pub fn rules_for(&self, user_agent: &str) -> RobotsRuleSet {
        RobotsRuleSet::new(
            self.groups_for(user_agent)
                .into_iter()
                .flat_map(|g| g.disallow.iter()),
        )
    }

    /// Gets the crawl delay for a specific user agent
    ///
    /// # Returns
    ///
    /// * `Some(f64)` - The crawl delay in seconds
    /// * `None` - If no crawl delay is specified
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        self.groups_for(user_agent)
            .into_iter()
            .find_map(|g| g.crawl_delay)
    }
}
