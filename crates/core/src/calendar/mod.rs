//! Calendar projection: reconciliation, bucketing and event operations

pub mod bucketing;
pub mod ports;
pub mod reconciler;
pub mod service;

pub use bucketing::{bucket_month, month_grid, parse_timezone, MonthView};
pub use ports::*;
pub use reconciler::{reconcile, ReconcileOptions};
pub use service::{CalendarService, DeletedEvent, RescheduledEvent, ReminderDraft};
