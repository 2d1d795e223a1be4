//! Sitemap (taxonomy) tree structures and search.
//!
//! The sitemap is a separate hierarchy from the page/region content tree.
//! Search traverses invisible subtrees (visibility only gates final
//! inclusion in link sets), and every recursive walk is depth-guarded so
//! pathological or cyclic input terminates instead of overflowing.

use serde::{Deserialize, Serialize};

use crate::paths::urls_match;

/// Bound on sitemap recursion. Trees deeper than this are treated as
/// malformed: the walk stops and logs.
pub const MAX_TRAVERSAL_DEPTH: usize = 128;

/// One node of the navigation taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SitemapItem {
    pub id: String,
    pub title: String,
    /// Absent or blank means "no link": the item can still structure the
    /// tree but never becomes a navigation link.
    pub url: Option<String>,
    pub visible: bool,
    pub items: Vec<SitemapItem>,
}

impl SitemapItem {
    pub fn new(title: &str, url: Option<&str>, visible: bool) -> Self {
        SitemapItem {
            title: title.to_string(),
            url: url.map(str::to_string),
            visible,
            ..Default::default()
        }
    }

    pub fn with_items(mut self, items: Vec<SitemapItem>) -> Self {
        self.items = items;
        self
    }

    /// True when the item carries a non-blank URL.
    pub fn has_link(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// Navigation URL matching: extension-normalized, case-sensitive.
    pub fn matches_url(&self, url: &str) -> bool {
        self.url
            .as_deref()
            .is_some_and(|own| !own.is_empty() && urls_match(own, url))
    }

    /// Depth-first search for the node matching `url`. Invisible subtrees
    /// are traversed; visibility never blocks search.
    pub fn find_with_url(&self, url: &str) -> Option<&SitemapItem> {
        self.find_with_url_bounded(url, 0)
    }

    fn find_with_url_bounded(&self, url: &str, depth: usize) -> Option<&SitemapItem> {
        if depth >= MAX_TRAVERSAL_DEPTH {
            tracing::warn!(
                "Sitemap traversal exceeded depth {} searching for '{}'",
                MAX_TRAVERSAL_DEPTH,
                url
            );
            return None;
        }
        if self.matches_url(url) {
            return Some(self);
        }
        self.items
            .iter()
            .find_map(|item| item.find_with_url_bounded(url, depth + 1))
    }

    /// Find the node whose direct child matches `url`. Matching the root
    /// itself yields `None`: the root has no parent.
    pub fn find_parent_of(&self, url: &str) -> Option<&SitemapItem> {
        self.find_parent_bounded(url, 0)
    }

    fn find_parent_bounded(&self, url: &str, depth: usize) -> Option<&SitemapItem> {
        if depth >= MAX_TRAVERSAL_DEPTH {
            tracing::warn!(
                "Sitemap traversal exceeded depth {} searching for the parent of '{}'",
                MAX_TRAVERSAL_DEPTH,
                url
            );
            return None;
        }
        if self.items.iter().any(|item| item.matches_url(url)) {
            return Some(self);
        }
        self.items
            .iter()
            .find_map(|item| item.find_parent_bounded(url, depth + 1))
    }

    /// Root-to-pivot ancestor path, pivot included, this (root) node
    /// excluded. Empty when no node matches `url`.
    pub fn breadcrumb_to(&self, url: &str) -> Vec<&SitemapItem> {
        let mut trail = Vec::new();
        for item in &self.items {
            if collect_breadcrumb(item, url, &mut trail, 0) {
                return trail;
            }
        }
        Vec::new()
    }
}

fn collect_breadcrumb<'a>(
    item: &'a SitemapItem,
    url: &str,
    trail: &mut Vec<&'a SitemapItem>,
    depth: usize,
) -> bool {
    if depth >= MAX_TRAVERSAL_DEPTH {
        tracing::warn!(
            "Sitemap traversal exceeded depth {} collecting breadcrumbs for '{}'",
            MAX_TRAVERSAL_DEPTH,
            url
        );
        return false;
    }
    trail.push(item);
    if item.matches_url(url) {
        return true;
    }
    for child in &item.items {
        if collect_breadcrumb(child, url, trail, depth + 1) {
            return true;
        }
    }
    trail.pop();
    false
}

/// A resolved navigation link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Link {
    pub url: String,
    pub link_text: Option<String>,
    pub alternate_text: Option<String>,
}

/// A derived navigation link set (top, context or breadcrumb).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NavigationLinks {
    pub id: Option<String>,
    pub items: Vec<Link>,
}
