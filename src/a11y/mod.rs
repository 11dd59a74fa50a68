//! Accessibility helpers.
//!
//! - [`Announcer`] for screen-reader live-region messages
//! - [`RovingTabIndex`] for arrow-key navigation inside lists and toolbars
//! - [`skip_to_main`] for the "skip to content" link

mod announcer;
mod roving;

pub use announcer::{Announcement, Announcer, Politeness};
pub use roving::{NavKey, Orientation, RovingTabIndex};

use crate::error::{DashError, Result};

/// Id of the main content landmark.
pub const MAIN_CONTENT_ID: &str = "main-content";

/// Page capability used by the skip link.
pub trait FocusTarget {
    /// Whether an element with `id` exists.
    fn has_element(&self, id: &str) -> bool;

    /// Move keyboard focus to the element.
    fn focus(&mut self, id: &str);

    /// Scroll the element into view.
    fn scroll_into_view(&mut self, id: &str);
}

/// Focus and scroll to the main content landmark.
pub fn skip_to_main(target: &mut dyn FocusTarget) -> Result<()> {
    if !target.has_element(MAIN_CONTENT_ID) {
        return Err(DashError::MissingLandmark {
            id: MAIN_CONTENT_ID.to_string(),
        });
    }
    target.focus(MAIN_CONTENT_ID);
    target.scroll_into_view(MAIN_CONTENT_ID);
    Ok(())
}
