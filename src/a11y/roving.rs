//! Roving tab index for composite widgets.

/// Keys that move focus inside a composite widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

impl NavKey {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }
}

/// Which arrow keys move focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
    Both,
}

/// Keeps exactly one item of a list tabbable.
///
/// Only the active item has `tabindex="0"`; the rest get `-1`. Arrow keys,
/// Home and End move the active item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RovingTabIndex {
    count: usize,
    active: usize,
    orientation: Orientation,
    wrap: bool,
}

impl RovingTabIndex {
    /// Create over `count` items, first item active, wrapping at the ends.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            active: 0,
            orientation: Orientation::default(),
            wrap: true,
        }
    }

    /// Set which arrow keys move focus.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set whether moving past an end wraps to the other end.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Index of the tabbable item, if there are any items.
    pub fn active(&self) -> Option<usize> {
        (self.count > 0).then_some(self.active)
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.count
    }

    /// `tabindex` value for item `index`.
    pub fn tab_index(&self, index: usize) -> i32 {
        if self.active() == Some(index) {
            0
        } else {
            -1
        }
    }

    /// Make `index` active, e.g. after a click. Out-of-range is ignored.
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.count {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Resize the list, keeping the active index in range.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if self.active >= count {
            self.active = count.saturating_sub(1);
        }
    }

    /// Apply a key press. Returns the new active index when focus moved.
    pub fn handle_key(&mut self, key: NavKey) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let last = self.count - 1;
        let target = match key {
            NavKey::Home => 0,
            NavKey::End => last,
            NavKey::ArrowUp | NavKey::ArrowLeft if self.accepts(key) => self.previous(last)?,
            NavKey::ArrowDown | NavKey::ArrowRight if self.accepts(key) => self.next(last)?,
            _ => return None,
        };

        if target == self.active {
            return None;
        }
        self.active = target;
        Some(target)
    }

    fn accepts(&self, key: NavKey) -> bool {
        match self.orientation {
            Orientation::Both => true,
            Orientation::Vertical => matches!(key, NavKey::ArrowUp | NavKey::ArrowDown),
            Orientation::Horizontal => matches!(key, NavKey::ArrowLeft | NavKey::ArrowRight),
        }
    }

    fn previous(&self, last: usize) -> Option<usize> {
        match self.active {
            0 if self.wrap => Some(last),
            0 => None,
            n => Some(n - 1),
        }
    }

    fn next(&self, last: usize) -> Option<usize> {
        if self.active < last {
            Some(self.active + 1)
        } else if self.wrap {
            Some(0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_move_and_wrap() {
        let mut roving = RovingTabIndex::new(3);
        assert_eq!(roving.handle_key(NavKey::ArrowDown), Some(1));
        assert_eq!(roving.handle_key(NavKey::ArrowDown), Some(2));
        assert_eq!(roving.handle_key(NavKey::ArrowDown), Some(0));
        assert_eq!(roving.handle_key(NavKey::ArrowUp), Some(2));
    }

    #[test]
    fn no_wrap_stops_at_ends() {
        let mut roving = RovingTabIndex::new(2).with_wrap(false);
        assert_eq!(roving.handle_key(NavKey::ArrowUp), None);
        assert_eq!(roving.handle_key(NavKey::ArrowDown), Some(1));
        assert_eq!(roving.handle_key(NavKey::ArrowDown), None);
        assert_eq!(roving.active(), Some(1));
    }

    #[test]
    fn home_and_end() {
        let mut roving = RovingTabIndex::new(5);
        assert_eq!(roving.handle_key(NavKey::End), Some(4));
        assert_eq!(roving.handle_key(NavKey::End), None);
        assert_eq!(roving.handle_key(NavKey::Home), Some(0));
    }

    #[test]
    fn orientation_filters_arrows() {
        let mut vertical = RovingTabIndex::new(3);
        assert_eq!(vertical.handle_key(NavKey::ArrowRight), None);

        let mut horizontal = RovingTabIndex::new(3).with_orientation(Orientation::Horizontal);
        assert_eq!(horizontal.handle_key(NavKey::ArrowDown), None);
        assert_eq!(horizontal.handle_key(NavKey::ArrowRight), Some(1));

        let mut both = RovingTabIndex::new(3).with_orientation(Orientation::Both);
        assert_eq!(both.handle_key(NavKey::ArrowRight), Some(1));
        assert_eq!(both.handle_key(NavKey::ArrowDown), Some(2));
    }

    #[test]
    fn only_active_item_is_tabbable() {
        let mut roving = RovingTabIndex::new(3);
        roving.focus(1);
        assert_eq!(roving.tab_index(0), -1);
        assert_eq!(roving.tab_index(1), 0);
        assert!(!roving.focus(7));
    }

    #[test]
    fn empty_list_has_no_active_item() {
        let mut roving = RovingTabIndex::new(0);
        assert_eq!(roving.active(), None);
        assert_eq!(roving.handle_key(NavKey::ArrowDown), None);
        assert_eq!(roving.tab_index(0), -1);
    }

    #[test]
    fn shrinking_clamps_active() {
        let mut roving = RovingTabIndex::new(5);
        roving.focus(4);
        roving.set_count(2);
        assert_eq!(roving.active(), Some(1));
    }

    #[test]
    fn parses_key_names() {
        assert_eq!(NavKey::from_key_name("Home"), Some(NavKey::Home));
        assert_eq!(NavKey::from_key_name("Enter"), None);
    }
}
