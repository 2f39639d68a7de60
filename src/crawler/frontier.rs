//! Crawl frontier: the set of canonical URLs already seen plus the queue of
//! URLs still to visit.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be audited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Canonical URL
    pub url: Url,

    /// Link distance from the base URL (base is 0)
    pub depth: u32,
}

/// Breadth-first frontier keyed by canonical URL
///
/// The frontier does not canonicalize; pass URLs produced by
/// [`CrawlFilter`](crate::crawler::CrawlFilter).
#[derive(Debug)]
pub struct Frontier {
    seen: HashSet<String>,
    queue: VecDeque<QueuedUrl>,
    max_depth: u32,
    max_pages: usize,
}

impl Frontier {
    pub fn new(max_depth: u32, max_pages: usize) -> Self {
        Self {
            seen: HashSet::new(),
            queue: VecDeque::new(),
            max_depth,
            max_pages,
        }
    }

    /// Enqueues a canonical URL
    ///
    /// # Returns
    ///
    /// * `true` - The URL is new and was queued
    /// * `false` - Already seen, too deep, or the page limit is reached
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        if depth > self.max_depth {
            tracing::trace!("Not queueing {} at depth {}", url, depth);
            return false;
        }

        if self.seen.contains(url.as_str()) {
            return false;
        }

        if self.seen.len() >= self.max_pages {
            tracing::debug!("Page limit {} reached, not queueing {}", self.max_pages, url);
            return false;
        }

        self.seen.insert(url.as_str().to_string());
        self.queue.push_back(QueuedUrl { url, depth });
        true
    }

    /// Takes the next URL in discovery order
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        self.queue.pop_front()
    }

    /// Checks whether a canonical URL was ever queued
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(url.as_str())
    }

    /// Number of distinct URLs ever queued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of URLs still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://example.com").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(5, 100);
        assert!(frontier.push(url("/a"), 0));
        assert!(frontier.push(url("/b"), 1));

        assert_eq!(frontier.pop().unwrap().url, url("/a"));
        assert_eq!(frontier.pop().unwrap().url, url("/b"));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_duplicates_rejected_after_pop() {
        let mut frontier = Frontier::new(5, 100);
        assert!(frontier.push(url("/a"), 0));
        assert!(!frontier.push(url("/a"), 1));

        frontier.pop();
        assert!(frontier.is_empty());
        assert!(!frontier.push(url("/a"), 0));
        assert!(frontier.contains(&url("/a")));
    }

    #[test]
    fn test_max_depth() {
        let mut frontier = Frontier::new(1, 100);
        assert!(frontier.push(url("/a"), 1));
        assert!(!frontier.push(url("/b"), 2));
        assert!(!frontier.contains(&url("/b")));
    }

    #[test]
    fn test_max_pages() {
        let mut frontier = Frontier::new(5, 2);
        assert!(frontier.push(url("/a"), 0));
        assert!(frontier.push(url("/b"), 0));
        assert!(!frontier.push(url("/c"), 0));

        frontier.pop();
        assert!(!frontier.push(url("/d"), 0));
        assert_eq!(frontier.seen_count(), 2);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_depth_recorded() {
        let mut frontier = Frontier::new(5, 100);
        frontier.push(url("/deep"), 3);
        assert_eq!(frontier.pop().unwrap().depth, 3);
    }
}
