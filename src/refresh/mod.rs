//! Auto-refresh timers.
//!
//! [`Ticker`] is a plain repeating timer on a background thread.
//! [`AutoRefresh`] arms one according to the preferences store.

mod driver;
mod ticker;

pub use driver::AutoRefresh;
pub use ticker::{TickCallback, Ticker};
