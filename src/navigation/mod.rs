//! Recent pages, favorites and quick links.
//!
//! - Recent items are unique by `href`, most recent first, capped at 8
//! - Favorites are unique by `href` and toggle on and off
//! - Quick links are unique by `href`, capped at 6, and start with a fixed
//!   set for new users
//!
//! All three lists are persisted together by [`NavigationStore`].

mod items;
mod store;

pub use items::{
    starter_quick_links, FavoriteItem, NavLink, NavigationLimits, NavigationState, QuickLink,
    RecentItem,
};
pub use store::NavigationStore;
