//! Day bucketing for the displayed month
//!
//! Bucketing is a view over an already reconciled list. Navigating months
//! only re-buckets; the reconciled list itself is reused.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use postdeck_domain::{CalendarEvent, PostdeckError, Result};
use serde::Serialize;

/// Events of one calendar month grouped by local day of month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub timezone: String,
    /// Day of month to events, each day in reconciled order.
    pub days: BTreeMap<u32, Vec<CalendarEvent>>,
    #[serde(skip)]
    tz: Tz,
}

impl MonthView {
    /// Events on `day`, empty when nothing is scheduled.
    pub fn events_on(&self, day: u32) -> &[CalendarEvent] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of bucketed events.
    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Whether `day` of this month is the local date of `now`.
    pub fn is_today(&self, day: u32, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.tz);
        local.year() == self.year && local.month() == self.month && local.day() == day
    }
}

/// Group reconciled events by day within `year`/`month` in `tz`.
///
/// Events outside the month and events with unparseable dates are left out.
pub fn bucket_month(events: &[CalendarEvent], year: i32, month: u32, tz: Tz) -> MonthView {
    let mut days: BTreeMap<u32, Vec<CalendarEvent>> = BTreeMap::new();

    for event in events {
        let Some(instant) = event.instant() else {
            continue;
        };
        let local = instant.with_timezone(&tz);
        if local.year() == year && local.month() == month {
            days.entry(local.day()).or_default().push(event.clone());
        }
    }

    MonthView { year, month, timezone: tz.name().to_string(), days, tz }
}

/// Six rows of seven cells starting on `week_start`; `None` pads days outside
/// the month. Returns `None` for an invalid month.
pub fn month_grid(
    year: i32,
    month: u32,
    week_start: Weekday,
) -> Option<[[Option<NaiveDate>; 7]; 6]> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead =
        (first.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;

    let mut grid = [[None; 7]; 6];
    let mut day = first;
    let mut cell = lead as usize;
    while day.month() == month {
        grid[cell / 7][cell % 7] = Some(day);
        cell += 1;
        day += Duration::days(1);
    }
    Some(grid)
}

/// Parse an IANA zone name such as `"Europe/Berlin"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|err| PostdeckError::Config(format!("Unknown timezone '{name}': {err}")))
}
