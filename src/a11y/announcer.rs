//! Screen-reader announcements.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::{Clock, SystemClock};

/// How urgently assistive technology should read an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Politeness {
    /// Read when the user is idle.
    #[default]
    Polite,
    /// Interrupt whatever is being read.
    Assertive,
}

impl Politeness {
    /// Value for the live region's `aria-live` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// The live region's current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub politeness: Politeness,
}

#[derive(Debug)]
struct Posted {
    announcement: Announcement,
    at_millis: i64,
}

/// Writes messages into a live region and clears them after a delay.
///
/// Clearing keeps a repeated message audible: the same text announced twice
/// is read twice because the region was emptied in between.
pub struct Announcer {
    clock: Arc<dyn Clock>,
    clear_after_ms: i64,
    current: Mutex<Option<Posted>>,
}

impl Announcer {
    /// Default delay before a message is cleared.
    pub const DEFAULT_CLEAR_AFTER_MS: i64 = 1_000;

    /// Create an announcer on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an announcer on `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            clear_after_ms: Self::DEFAULT_CLEAR_AFTER_MS,
            current: Mutex::new(None),
        }
    }

    /// Clear messages `millis` after they are posted.
    pub fn clear_after(mut self, millis: i64) -> Self {
        self.clear_after_ms = millis;
        self
    }

    /// Replace the live region's content.
    pub fn announce(&self, message: impl Into<String>, politeness: Politeness) {
        let message = message.into();
        tracing::debug!("Announcing ({}): {}", politeness.as_str(), message);
        *self.lock() = Some(Posted {
            announcement: Announcement {
                message,
                politeness,
            },
            at_millis: self.clock.now_millis(),
        });
    }

    /// The live region's content, if the message has not expired.
    pub fn current(&self) -> Option<Announcement> {
        let mut current = self.lock();
        let expired = current
            .as_ref()
            .map(|posted| self.clock.now_millis() - posted.at_millis >= self.clear_after_ms)
            .unwrap_or(false);
        if expired {
            *current = None;
        }
        current.as_ref().map(|posted| posted.announcement.clone())
    }

    /// Empty the live region now.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Posted>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Announcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Announcer")
            .field("clear_after_ms", &self.clear_after_ms)
            .finish_non_exhaustive()
    }
}
