//! Navigation list entries and the list policies.

use serde::{Deserialize, Serialize};

use crate::clock::to_datetime;

/// A recently visited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    /// Route identifier.
    pub href: String,
    /// Display name.
    pub label: String,
    /// Visit time in epoch milliseconds.
    pub timestamp: i64,
}

impl RecentItem {
    /// Visit time as a UTC timestamp.
    pub fn visited_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        to_datetime(self.timestamp)
    }
}

/// A favorited page or a quick link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Route identifier.
    pub href: String,
    /// Display name.
    pub label: String,
}

impl NavLink {
    /// Create a link.
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// A favorited page.
pub type FavoriteItem = NavLink;

/// A user-curated shortcut.
pub type QuickLink = NavLink;

/// Capacities of the bounded lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationLimits {
    /// Maximum number of recent items kept.
    pub recent_items: usize,
    /// Maximum number of quick links accepted.
    pub quick_links: usize,
}

impl NavigationLimits {
    pub const DEFAULT_RECENT_ITEMS: usize = 8;
    pub const DEFAULT_QUICK_LINKS: usize = 6;
}

impl Default for NavigationLimits {
    fn default() -> Self {
        Self {
            recent_items: Self::DEFAULT_RECENT_ITEMS,
            quick_links: Self::DEFAULT_QUICK_LINKS,
        }
    }
}

/// Quick links a new user starts with.
pub fn starter_quick_links() -> Vec<QuickLink> {
    vec![
        NavLink::new("/clients", "Clients"),
        NavLink::new("/agents", "Agents"),
        NavLink::new("/analytics", "Analytics"),
    ]
}

/// Recent items, favorites and quick links, persisted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Most recent first.
    pub recent_items: Vec<RecentItem>,
    /// Insertion order.
    pub favorites: Vec<FavoriteItem>,
    /// Insertion order.
    pub quick_links: Vec<QuickLink>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            recent_items: Vec::new(),
            favorites: Vec::new(),
            quick_links: starter_quick_links(),
        }
    }
}

impl NavigationState {
    /// Move `href` to the front of the recent list, evicting past `capacity`.
    pub fn add_recent_item(&mut self, item: RecentItem, capacity: usize) {
        self.recent_items.retain(|existing| existing.href != item.href);
        self.recent_items.insert(0, item);
        self.recent_items.truncate(capacity);
    }

    /// Flip whether `href` is a favorite. Returns the new membership.
    pub fn toggle_favorite(&mut self, link: FavoriteItem) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| f.href == link.href) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(link);
            true
        }
    }

    /// Append a quick link unless present or at `capacity`.
    pub fn add_quick_link(&mut self, link: QuickLink, capacity: usize) -> bool {
        if self.quick_links.len() >= capacity || self.has_quick_link(&link.href) {
            return false;
        }
        self.quick_links.push(link);
        true
    }

    /// Remove the quick link for `href`. Returns whether one was removed.
    pub fn remove_quick_link(&mut self, href: &str) -> bool {
        let before = self.quick_links.len();
        self.quick_links.retain(|link| link.href != href);
        self.quick_links.len() != before
    }

    /// Check whether `href` is a favorite.
    pub fn is_favorite(&self, href: &str) -> bool {
        self.favorites.iter().any(|f| f.href == href)
    }

    /// Check whether `href` is a quick link.
    pub fn has_quick_link(&self, href: &str) -> bool {
        self.quick_links.iter().any(|link| link.href == href)
    }

    /// Repair lists that break the uniqueness or capacity rules.
    ///
    /// Stored order is the recency order and is kept as is; the first
    /// occurrence of a duplicated `href` wins.
    pub fn normalize(&mut self, limits: NavigationLimits) {
        dedup_by_href(&mut self.recent_items);
        self.recent_items.truncate(limits.recent_items);

        dedup_by_href(&mut self.favorites);

        dedup_by_href(&mut self.quick_links);
        self.quick_links.truncate(limits.quick_links);
    }
}

/// Entries keyed by route identifier.
trait Keyed {
    fn href(&self) -> &str;
}

impl Keyed for RecentItem {
    fn href(&self) -> &str {
        &self.href
    }
}

impl Keyed for NavLink {
    fn href(&self) -> &str {
        &self.href
    }
}

fn dedup_by_href<T: Keyed>(items: &mut Vec<T>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.href().to_string()));
}
