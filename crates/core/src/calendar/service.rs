//! Calendar service - event loading and event operations
//!
//! Reads go through the reconciler; writes always target the source
//! document (post, reminder or legacy record), never a derived event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use postdeck_domain::constants::REMINDER_EVENT_PREFIX;
use postdeck_domain::utils::dates::{combine_date_time, format_instant, parse_instant};
use postdeck_domain::{
    resolve_association, CalendarEvent, EventAssociation, OwnerScope, Post, PostdeckError,
    Reminder, ReminderType, Result,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::bucketing::{bucket_month, MonthView};
use super::ports::{LegacyEventRepository, PostRepository, ReminderRepository};
use super::reconciler::{reconcile, ReconcileOptions};

const DEFAULT_REMINDER_TIME: &str = "09:00";

/// Form input for creating or editing a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReminderDraft {
    pub title: String,
    /// `YYYY-MM-DD`, or a full stored timestamp.
    pub date: String,
    /// `HH:MM`; defaults to 09:00 when blank.
    pub time: Option<String>,
    pub reminder_type: ReminderType,
    pub description: Option<String>,
}

/// What `delete_event` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletedEvent {
    /// The source post and any legacy documents pointing at it.
    Post { post_id: String, legacy_removed: usize },
    Reminder { reminder_id: String },
    /// A legacy document whose post is already gone.
    LegacyEvent { event_id: String },
}

/// What `reschedule_event` rewrote.
#[derive(Debug, Clone, PartialEq)]
pub enum RescheduledEvent {
    Post(Post),
    Reminder(Reminder),
}

/// Calendar service
pub struct CalendarService {
    posts: Arc<dyn PostRepository>,
    reminders: Arc<dyn ReminderRepository>,
    legacy: Arc<dyn LegacyEventRepository>,
    options: ReconcileOptions,
    timezone: Tz,
}

impl CalendarService {
    /// Create a new calendar service with default options in UTC
    pub fn new(
        posts: Arc<dyn PostRepository>,
        reminders: Arc<dyn ReminderRepository>,
        legacy: Arc<dyn LegacyEventRepository>,
    ) -> Self {
        Self { posts, reminders, legacy, options: ReconcileOptions::default(), timezone: Tz::UTC }
    }

    /// Override reconciliation options
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    /// Zone of the displayed calendar
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Fetch all three collections and reconcile them
    #[instrument(skip(self), fields(owner = %scope))]
    pub async fn load_events(&self, scope: &OwnerScope) -> Result<Vec<CalendarEvent>> {
        let (posts, legacy, reminders) = tokio::try_join!(
            self.posts.list_posts(scope),
            self.legacy.list_legacy_events(scope),
            self.reminders.list_reminders(scope),
        )?;

        Ok(reconcile(&posts, &legacy, &reminders, &self.options))
    }

    /// Reconciled events bucketed for one month
    pub async fn month_view(
        &self,
        scope: &OwnerScope,
        year: i32,
        month: u32,
    ) -> Result<MonthView> {
        let events = self.load_events(scope).await?;
        self.bucket(&events, year, month)
    }

    /// Re-bucket an already reconciled list in the calendar's timezone.
    pub fn bucket(&self, events: &[CalendarEvent], year: i32, month: u32) -> Result<MonthView> {
        if !(1..=12).contains(&month) {
            return Err(PostdeckError::validation("month", format!("{month} is not a month")));
        }
        Ok(bucket_month(events, year, month, self.timezone))
    }

    /// Move an event to a new date and time.
    ///
    /// Post events rewrite the post's `scheduledDate`, so every platform of
    /// that post moves. Reminder events rewrite the reminder.
    #[instrument(skip(self), fields(owner = %scope))]
    pub async fn reschedule_event(
        &self,
        scope: &OwnerScope,
        event_id: &str,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<RescheduledEvent> {
        let instant = validate_date_time(date, time)?;
        let stamp = format_instant(instant);

        if let Some(reminder_id) = event_id.strip_prefix(REMINDER_EVENT_PREFIX) {
            let mut reminder = self.find_reminder(scope, reminder_id).await?;
            reminder.date = stamp;
            reminder.reminder_time = Some(instant.format("%H:%M").to_string());
            self.reminders.upsert_reminder(scope, reminder.clone()).await?;
            info!(reminder_id, "reminder rescheduled");
            return Ok(RescheduledEvent::Reminder(reminder));
        }

        let (_, association) = self.locate_event(scope, event_id).await?;
        let post_id = association.map(|association| association.post_id).ok_or_else(|| {
            PostdeckError::InvalidInput(format!("Event {event_id} is not linked to a post"))
        })?;
        let mut post = self
            .posts
            .get_post(scope, &post_id)
            .await?
            .ok_or_else(|| PostdeckError::NotFound(format!("post {post_id}")))?;

        post.scheduled_date = Some(stamp);
        self.posts.upsert_post(scope, post.clone()).await?;
        info!(post_id = %post.id, "post rescheduled");
        Ok(RescheduledEvent::Post(post))
    }

    /// Delete the document behind a calendar event.
    #[instrument(skip(self), fields(owner = %scope))]
    pub async fn delete_event(&self, scope: &OwnerScope, event_id: &str) -> Result<DeletedEvent> {
        if let Some(reminder_id) = event_id.strip_prefix(REMINDER_EVENT_PREFIX) {
            self.reminders.delete_reminder(scope, reminder_id).await?;
            return Ok(DeletedEvent::Reminder { reminder_id: reminder_id.to_string() });
        }

        let (legacy, association) = self.locate_event(scope, event_id).await?;
        let stored = legacy.iter().find(|event| event.id == event_id);

        if let Some(association) = association {
            if self.posts.get_post(scope, &association.post_id).await?.is_some() {
                self.posts.delete_post(scope, &association.post_id).await?;

                let mut legacy_removed = 0;
                for event in &legacy {
                    let linked = event
                        .association()
                        .is_some_and(|linked| linked.post_id == association.post_id);
                    if linked {
                        self.legacy.delete_legacy_event(scope, &event.id).await?;
                        legacy_removed += 1;
                    }
                }

                info!(post_id = %association.post_id, legacy_removed, "post deleted from calendar");
                return Ok(DeletedEvent::Post { post_id: association.post_id, legacy_removed });
            }
        }

        if stored.is_some() {
            self.legacy.delete_legacy_event(scope, event_id).await?;
            return Ok(DeletedEvent::LegacyEvent { event_id: event_id.to_string() });
        }

        Err(PostdeckError::NotFound(format!("calendar event {event_id}")))
    }

    /// Create a reminder owned by `scope`
    #[instrument(skip(self, draft), fields(owner = %scope))]
    pub async fn create_reminder(
        &self,
        scope: &OwnerScope,
        draft: ReminderDraft,
        now: DateTime<Utc>,
    ) -> Result<Reminder> {
        let (title, instant) = validate_reminder(&draft)?;
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            title,
            date: format_instant(instant),
            reminder_type: draft.reminder_type,
            description: non_blank(draft.description),
            reminder_time: Some(instant.format("%H:%M").to_string()),
            created_at: Some(format_instant(now)),
            user_id: scope.as_str().to_string(),
        };

        self.reminders.upsert_reminder(scope, reminder.clone()).await?;
        info!(reminder_id = %reminder.id, "reminder created");
        Ok(reminder)
    }

    /// Replace the editable fields of an existing reminder
    #[instrument(skip(self, draft), fields(owner = %scope))]
    pub async fn update_reminder(
        &self,
        scope: &OwnerScope,
        reminder_id: &str,
        draft: ReminderDraft,
    ) -> Result<Reminder> {
        let (title, instant) = validate_reminder(&draft)?;
        let mut reminder = self.find_reminder(scope, reminder_id).await?;

        reminder.title = title;
        reminder.date = format_instant(instant);
        reminder.reminder_time = Some(instant.format("%H:%M").to_string());
        reminder.reminder_type = draft.reminder_type;
        reminder.description = non_blank(draft.description);

        self.reminders.upsert_reminder(scope, reminder.clone()).await?;
        Ok(reminder)
    }

    /// Delete a reminder by id
    pub async fn delete_reminder(&self, scope: &OwnerScope, reminder_id: &str) -> Result<()> {
        self.reminders.delete_reminder(scope, reminder_id).await
    }

    async fn find_reminder(&self, scope: &OwnerScope, reminder_id: &str) -> Result<Reminder> {
        self.reminders
            .list_reminders(scope)
            .await?
            .into_iter()
            .find(|reminder| reminder.id == reminder_id)
            .ok_or_else(|| PostdeckError::NotFound(format!("reminder {reminder_id}")))
    }

    /// Post behind an event id, plus the stored legacy records.
    ///
    /// The displayed event's explicit link wins, then a stored legacy
    /// record's link. Parsing the id is the last resort.
    async fn locate_event(
        &self,
        scope: &OwnerScope,
        event_id: &str,
    ) -> Result<(Vec<CalendarEvent>, Option<EventAssociation>)> {
        let (posts, legacy, reminders) = tokio::try_join!(
            self.posts.list_posts(scope),
            self.legacy.list_legacy_events(scope),
            self.reminders.list_reminders(scope),
        )?;

        let displayed = reconcile(&posts, &legacy, &reminders, &self.options);
        let association = displayed
            .iter()
            .chain(legacy.iter())
            .filter(|event| event.id == event_id)
            .find_map(CalendarEvent::association)
            .or_else(|| resolve_association(event_id));
        Ok((legacy, association))
    }
}

fn validate_date_time(date: Option<&str>, time: Option<&str>) -> Result<DateTime<Utc>> {
    let date = date.map(str::trim).filter(|d| !d.is_empty());
    let time = time.map(str::trim).filter(|t| !t.is_empty());
    let (Some(date), Some(time)) = (date, time) else {
        return Err(PostdeckError::validation("time", "Please select both date and time"));
    };

    combine_date_time(date, time).ok_or_else(|| {
        PostdeckError::validation("date", format!("Invalid date or time: {date} {time}"))
    })
}

fn validate_reminder(draft: &ReminderDraft) -> Result<(String, DateTime<Utc>)> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(PostdeckError::validation("title", "Please enter a reminder title"));
    }

    let date = draft.date.trim();
    if date.is_empty() {
        return Err(PostdeckError::validation("date", "Please select a date"));
    }

    let time = draft
        .time
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_REMINDER_TIME);
    let instant = combine_date_time(date, time)
        .or_else(|| parse_instant(date))
        .ok_or_else(|| PostdeckError::validation("date", format!("Invalid date: {date}")))?;

    Ok((title.to_string(), instant))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
