//! Event reconciler
//!
//! Turns the three raw collections (posts, legacy calendar documents,
//! reminders) into the single ordered list the calendar renders.
//!
//! The pass is synchronous and pure: identical inputs give identical output,
//! and nothing here reads the clock or touches a store. Bad records are
//! skipped with a diagnostic, never surfaced as errors.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use postdeck_domain::constants::{
    DEFAULT_EXCLUDED_PLATFORMS, DEFAULT_TITLE_PREVIEW_LENGTH, REMINDER_PLATFORM,
};
use postdeck_domain::utils::title::title_preview;
use postdeck_domain::{
    post_event_id, reminder_event_id, CalendarConfig, CalendarEvent, EventType, Post, PostStatus,
    Reminder,
};
use tracing::{debug, warn};

/// Inputs to a reconciliation pass that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Platforms whose posts stay off this calendar.
    pub excluded_platforms: Vec<String>,
    /// Characters of post content kept in event titles.
    pub title_preview_length: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            excluded_platforms: DEFAULT_EXCLUDED_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            title_preview_length: DEFAULT_TITLE_PREVIEW_LENGTH,
        }
    }
}

impl From<&CalendarConfig> for ReconcileOptions {
    fn from(config: &CalendarConfig) -> Self {
        Self {
            excluded_platforms: config.excluded_platforms.clone(),
            title_preview_length: config.title_preview_length,
        }
    }
}

impl ReconcileOptions {
    /// Whether a post may be projected onto the calendar.
    pub fn qualifies(&self, post: &Post) -> bool {
        post.is_scheduled()
            && post.status.is_calendar_eligible()
            && !post.targets_any(&self.excluded_platforms)
    }
}

/// Reconcile posts, legacy events and reminders into one calendar list.
///
/// Output order: ascending by instant, ties kept in input order (post events
/// in platform order, then surviving legacy events, then reminders).
/// Unparseable dates sort last.
pub fn reconcile(
    posts: &[Post],
    legacy_events: &[CalendarEvent],
    reminders: &[Reminder],
    options: &ReconcileOptions,
) -> Vec<CalendarEvent> {
    let qualifying: Vec<&Post> = posts.iter().filter(|post| options.qualifies(post)).collect();
    let by_id: HashMap<&str, &Post> =
        qualifying.iter().map(|post| (post.id.as_str(), *post)).collect();

    let derived = qualifying.iter().flat_map(|post| expand_post(post, options));
    let legacy = legacy_events.iter().filter_map(|event| adopt_legacy(event, &by_id));

    let mut seen = HashSet::new();
    let mut events: Vec<CalendarEvent> =
        derived.chain(legacy).filter(|event| seen.insert(event.id.clone())).collect();

    events.extend(reminders.iter().map(reminder_event));

    let ordered = sort_by_instant(events);
    debug!(
        posts = posts.len(),
        qualifying = qualifying.len(),
        legacy = legacy_events.len(),
        reminders = reminders.len(),
        events = ordered.len(),
        "calendar reconciled"
    );
    ordered
}

/// One event per platform, in platform order.
fn expand_post<'a>(
    post: &'a Post,
    options: &'a ReconcileOptions,
) -> impl Iterator<Item = CalendarEvent> + 'a {
    let title = title_preview(post.content.as_deref(), options.title_preview_length);
    let event_type = post.event_type();
    let date = post.scheduled_date.clone().unwrap_or_default();

    post.platforms.iter().enumerate().map(move |(index, platform)| CalendarEvent {
        id: post_event_id(&post.id, platform, index),
        title: title.clone(),
        date: date.clone(),
        event_type,
        platform: platform.clone(),
        status: post.status,
        post_id: Some(post.id.clone()),
        platform_index: Some(index),
        reminder_type: None,
        reminder_description: None,
        media_url: post.media_url.clone(),
    })
}

/// Keep a legacy document only while its source post still qualifies.
///
/// The surviving copy takes status and date from the post; the stored
/// values are never trusted.
fn adopt_legacy(event: &CalendarEvent, qualifying: &HashMap<&str, &Post>) -> Option<CalendarEvent> {
    let Some(association) = event.association() else {
        warn!(event_id = %event.id, "dropping legacy calendar event with unresolvable id");
        return None;
    };

    let Some(post) = qualifying.get(association.post_id.as_str()) else {
        debug!(
            event_id = %event.id,
            post_id = %association.post_id,
            "dropping legacy calendar event whose post no longer qualifies"
        );
        return None;
    };

    let mut adopted = event.clone();
    adopted.status = post.status;
    adopted.date = post.scheduled_date.clone().unwrap_or_default();
    adopted.post_id = Some(post.id.clone());
    adopted.platform_index = association.platform_index;
    Some(adopted)
}

fn reminder_event(reminder: &Reminder) -> CalendarEvent {
    CalendarEvent {
        id: reminder_event_id(&reminder.id),
        title: reminder.title.clone(),
        date: reminder.date.clone(),
        event_type: EventType::Reminder,
        platform: REMINDER_PLATFORM.to_string(),
        status: PostStatus::Scheduled,
        post_id: None,
        platform_index: None,
        reminder_type: Some(reminder.reminder_type),
        reminder_description: reminder.description.clone(),
        media_url: None,
    }
}

/// Stable sort by parsed instant with unparseable dates last.
fn sort_by_instant(events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, CalendarEvent)> =
        events.into_iter().map(|event| (event.instant(), event)).collect();
    keyed.sort_by_key(|(instant, _)| (instant.is_none(), *instant));
    keyed.into_iter().map(|(_, event)| event).collect()
}
