//! Calendar event id synthesis and legacy association parsing
//!
//! Freshly derived events carry an explicit `postId`/`platformIndex`, so the
//! parser below only matters for documents written before those fields
//! existed. It is kept in this one function so the call sites can switch to
//! a direct lookup once legacy data is migrated.
//!
//! Supported legacy formats:
//! - `post-{postId}-{platform}-{index}`: post ids may contain hyphens, so
//!   with three or more segments everything but the last two is the post id;
//!   with fewer the first segment is used.
//! - `cal-{postId}-...`: the first segment is the post id.
//!
//! The split is best-effort. A platform tag containing a hyphen shifts the
//! boundary and recovers the wrong id; the reconciler then drops the event
//! because no qualifying post matches. Event operations look up the displayed
//! event's explicit link first, so derived events never depend on the split.
//!
//! An explicit `postId` also overrides the "unparseable id is dropped" rule:
//! a legacy record such as `evt-42` that names its post is kept and
//! deduplicated like any other record for that post.

use serde::{Deserialize, Serialize};

use crate::constants::{
    EVENT_ID_SEPARATOR, LEGACY_EVENT_PREFIX, POST_EVENT_PREFIX, REMINDER_EVENT_PREFIX,
};

/// Where an association was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssociationSource {
    /// The persisted `postId` field.
    Explicit,
    /// Parsed from a `post-` id.
    PostEventId,
    /// Parsed from a `cal-` id.
    LegacyCalendarId,
}

/// Link from a calendar event back to its source post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAssociation {
    pub post_id: String,
    pub platform_index: Option<usize>,
    pub source: AssociationSource,
}

/// Id for the event derived from `platform` at `index` of a post.
#[must_use]
pub fn post_event_id(post_id: &str, platform: &str, index: usize) -> String {
    format!("{POST_EVENT_PREFIX}{post_id}{EVENT_ID_SEPARATOR}{platform}{EVENT_ID_SEPARATOR}{index}")
}

/// Id for the event derived from a reminder.
#[must_use]
pub fn reminder_event_id(reminder_id: &str) -> String {
    format!("{REMINDER_EVENT_PREFIX}{reminder_id}")
}

/// Recover the source post from an event id.
///
/// Returns `None` for reminder ids, for ids matching neither legacy format
/// and for ids whose recovered post id is empty.
///
/// # Examples
///
/// ```
/// use postdeck_domain::utils::event_id::resolve_association;
///
/// let association = resolve_association("post-roadmap-abc123-0-1-1697000000000-Instagram-0")
///     .expect("post- ids resolve");
/// assert_eq!(association.post_id, "roadmap-abc123-0-1-1697000000000");
/// assert_eq!(association.platform_index, Some(0));
///
/// assert!(resolve_association("evt_42").is_none());
/// ```
#[must_use]
pub fn resolve_association(event_id: &str) -> Option<EventAssociation> {
    if let Some(rest) = event_id.strip_prefix(POST_EVENT_PREFIX) {
        let parts: Vec<&str> = rest.split(EVENT_ID_SEPARATOR).collect();
        let (post_id, platform_index) = if parts.len() >= 3 {
            let tail = parts.len() - 2;
            (parts[..tail].join("-"), parts[parts.len() - 1].parse::<usize>().ok())
        } else {
            (parts[0].to_string(), None)
        };
        return non_empty(post_id, platform_index, AssociationSource::PostEventId);
    }

    if let Some(rest) = event_id.strip_prefix(LEGACY_EVENT_PREFIX) {
        let post_id = rest.split(EVENT_ID_SEPARATOR).next().unwrap_or_default();
        return non_empty(post_id.to_string(), None, AssociationSource::LegacyCalendarId);
    }

    None
}

fn non_empty(
    post_id: String,
    platform_index: Option<usize>,
    source: AssociationSource,
) -> Option<EventAssociation> {
    (!post_id.is_empty()).then_some(EventAssociation { post_id, platform_index, source })
}
