//! Calendar commands

use chrono::{NaiveDate, Utc, Weekday};
use postdeck_core::{month_grid, DeletedEvent, MonthView, Notification, RescheduledEvent};
use postdeck_domain::{CalendarEvent, OwnerScope, PostdeckError, Result};
use postdeck_infra::CalendarFeed;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::utils::command_helpers::{execute_command, CommandResult};
use crate::AppContext;

/// One displayed month: bucketed events plus the cell layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthViewResponse {
    #[serde(flatten)]
    pub view: MonthView,
    /// Six Monday-first weeks; `null` pads days outside the month.
    pub weeks: Vec<[Option<NaiveDate>; 7]>,
    /// Day of this month that is today in the calendar timezone.
    pub today: Option<u32>,
}

/// Drag-and-drop or edit-form reschedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct RescheduleInput {
    pub event_id: String,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
}

/// Reconciled events for the owner, in display order.
pub async fn get_calendar_events(
    ctx: &AppContext,
    owner: &OwnerScope,
) -> CommandResult<Vec<CalendarEvent>> {
    execute_command("calendar::get_calendar_events", || ctx.calendar.load_events(owner)).await
}

/// Events of `year`/`month` grouped by local day.
pub async fn get_month_view(
    ctx: &AppContext,
    owner: &OwnerScope,
    year: i32,
    month: u32,
) -> CommandResult<MonthViewResponse> {
    execute_command("calendar::get_month_view", || async {
        let view = ctx.calendar.month_view(owner, year, month).await?;
        month_view_response(view, year, month)
    })
    .await
}

/// Month navigation over a running feed: re-buckets the feed's latest list
/// without touching the store. Falls back to a full load when the feed is
/// stopped.
pub async fn get_month_view_from_feed(
    ctx: &AppContext,
    feed: &CalendarFeed,
    year: i32,
    month: u32,
) -> CommandResult<MonthViewResponse> {
    if !feed.is_running() {
        return get_month_view(ctx, feed.owner(), year, month).await;
    }

    execute_command("calendar::get_month_view_from_feed", || async {
        let view = ctx.calendar.bucket(&feed.latest(), year, month)?;
        month_view_response(view, year, month)
    })
    .await
}

fn month_view_response(view: MonthView, year: i32, month: u32) -> Result<MonthViewResponse> {
    let grid = month_grid(year, month, Weekday::Mon).ok_or_else(|| {
        PostdeckError::validation("month", format!("{year}-{month:02} is not a month"))
    })?;
    let now = Utc::now();
    let today = (1..=31).find(|day| view.is_today(*day, now));

    Ok(MonthViewResponse { view, weeks: grid.to_vec(), today })
}

pub async fn reschedule_calendar_event(
    ctx: &AppContext,
    owner: &OwnerScope,
    input: RescheduleInput,
) -> CommandResult<Notification> {
    execute_command("calendar::reschedule_calendar_event", || async {
        let rescheduled = ctx
            .calendar
            .reschedule_event(owner, &input.event_id, input.date.as_deref(), input.time.as_deref())
            .await?;

        Ok(match rescheduled {
            RescheduledEvent::Post(_) => Notification::success("Post rescheduled"),
            RescheduledEvent::Reminder(_) => Notification::success("Reminder rescheduled"),
        })
    })
    .await
}

pub async fn delete_calendar_event(
    ctx: &AppContext,
    owner: &OwnerScope,
    event_id: String,
) -> CommandResult<Notification> {
    execute_command("calendar::delete_calendar_event", || async {
        Ok(match ctx.calendar.delete_event(owner, &event_id).await? {
            DeletedEvent::Post { .. } => Notification::success("Post deleted"),
            DeletedEvent::Reminder { .. } => Notification::success("Reminder deleted"),
            DeletedEvent::LegacyEvent { .. } => Notification::success("Event removed"),
        })
    })
    .await
}
