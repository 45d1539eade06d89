//! Domain types and models
//!
//! Wire names follow the document store (camelCase fields, label enums), so
//! the same structs deserialize snapshots written by the web client.

pub mod calendar;
pub mod caption;
pub mod post;
pub mod reminder;

pub use calendar::{CalendarEvent, EventType};
pub use caption::{
    CaptionCandidate, CaptionRequest, OptimizeCaptionRequest, RegenerateCaption, RepurposeRequest,
};
pub use post::{MediaType, Post, PostStatus};
pub use reminder::{Reminder, ReminderType};

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Owner whose documents a store call is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(transparent)]
pub struct OwnerScope(pub String);

impl OwnerScope {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
