//! Live calendar feed
//!
//! Keeps one owner's reconciled calendar current by re-running the
//! reconciler whenever the document store reports a write.

mod calendar_feed;
mod error;

pub use calendar_feed::{CalendarFeed, CalendarFeedConfig};
pub use error::{FeedError, FeedResult};
