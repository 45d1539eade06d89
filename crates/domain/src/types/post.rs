//! Post documents
//!
//! Posts are owned by the composer; the calendar only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::calendar::EventType;
use crate::utils::dates::parse_instant;

/// Authoritative publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    #[serde(rename = "In Review")]
    InReview,
}

crate::impl_domain_label_conversions!(PostStatus {
    Draft => "Draft",
    Scheduled => "Scheduled",
    Published => "Published",
    InReview => "In Review",
});

impl PostStatus {
    /// Statuses that are allowed onto the calendar.
    pub const fn is_calendar_eligible(self) -> bool {
        matches!(self, Self::Draft | Self::Scheduled | Self::Published)
    }
}

/// Attachment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    /// Anything the composer may write that the calendar has no use for.
    #[serde(other)]
    Other,
}

crate::impl_domain_label_conversions!(MediaType {
    Image => "image",
    Video => "video",
    Other => "other",
});

/// A post as stored by the composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// ISO-8601 instant; its presence alone makes the post calendar-visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// Explicit sub-type hint such as `"Reel"` or `"Story"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Post {
    /// Minimal draft post, mostly useful for fixtures and the composer.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            scheduled_date: None,
            platforms: Vec::new(),
            status: PostStatus::Draft,
            media_url: None,
            media_type: None,
            content_type: None,
            user_id: None,
        }
    }

    /// True when a non-blank schedule is set.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_date.as_deref().is_some_and(|raw| !raw.trim().is_empty())
    }

    /// Parsed schedule, `None` when unset or unparseable.
    pub fn scheduled_instant(&self) -> Option<DateTime<Utc>> {
        self.scheduled_date.as_deref().and_then(parse_instant)
    }

    /// Resolve the calendar event type.
    ///
    /// Precedence: explicit sub-type hint, then video media, then `Post`.
    pub fn event_type(&self) -> EventType {
        let hinted = self.content_type.as_deref().and_then(|hint| {
            match hint.trim().to_ascii_lowercase().as_str() {
                "reel" => Some(EventType::Reel),
                "story" => Some(EventType::Story),
                "post" => Some(EventType::Post),
                _ => None,
            }
        });

        hinted.unwrap_or(match self.media_type {
            Some(MediaType::Video) => EventType::Reel,
            _ => EventType::Post,
        })
    }

    /// Whether any platform tag matches the exclusion list (ASCII case-insensitive).
    pub fn targets_any<S: AsRef<str>>(&self, excluded: &[S]) -> bool {
        self.platforms
            .iter()
            .any(|platform| excluded.iter().any(|ex| platform.eq_ignore_ascii_case(ex.as_ref())))
    }
}
