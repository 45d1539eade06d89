//! # Postdeck Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The calendar reconciler and month bucketing
//! - Port/adapter interfaces (traits) for the document store, blob store and
//!   caption generation service
//! - Calendar, reminder and caption services
//!
//! ## Architecture Principles
//! - Only depends on `postdeck-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - The reconciler is synchronous and side-effect free

pub mod calendar;
pub mod captions;
pub mod notifications;

// Re-export specific items to avoid ambiguity
pub use calendar::ports::{BlobStore, LegacyEventRepository, PostRepository, ReminderRepository};
pub use calendar::{
    bucket_month, month_grid, reconcile, CalendarService, DeletedEvent, MonthView,
    ReconcileOptions, RescheduledEvent, ReminderDraft,
};
pub use captions::ports::CaptionGenerator;
pub use captions::{
    CaptionService, EditSessions, MediaCaptionRequest, RegenerateOutcome, RequestTicket, SessionId,
};
pub use notifications::{Notification, NotificationLevel};
