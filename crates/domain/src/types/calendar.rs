//! Calendar event projection
//!
//! Calendar events are derived for display. Post-derived events are never
//! persisted by the reconciler; the only stored events are legacy `cal-`
//! documents kept for backward compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::post::PostStatus;
use super::reminder::ReminderType;
use crate::utils::dates::parse_instant;
use crate::utils::event_id::{resolve_association, AssociationSource, EventAssociation};

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Post,
    Story,
    Reel,
    Reminder,
}

crate::impl_domain_label_conversions!(EventType {
    Post => "post",
    Story => "story",
    Reel => "reel",
    Reminder => "reminder",
});

/// A calendar-displayable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// ISO-8601 instant used for day bucketing and ordering.
    pub date: String,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub status: PostStatus,
    /// Explicit association to the source post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_type: Option<ReminderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl CalendarEvent {
    /// Parsed event instant, `None` when the stored date is malformed.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.date)
    }

    pub fn is_reminder(&self) -> bool {
        self.event_type == EventType::Reminder
    }

    /// Association to the source post.
    ///
    /// The explicit `postId` field wins; the id heuristic is only consulted
    /// for records written before the field existed.
    pub fn association(&self) -> Option<EventAssociation> {
        match self.post_id.as_deref() {
            Some(post_id) if !post_id.is_empty() => Some(EventAssociation {
                post_id: post_id.to_string(),
                platform_index: self.platform_index,
                source: AssociationSource::Explicit,
            }),
            _ => resolve_association(&self.id),
        }
    }
}
