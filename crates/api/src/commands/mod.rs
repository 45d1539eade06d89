//! Commands - the boundary the calendar and caption UI calls into
//!
//! Each command takes the shared [`crate::AppContext`] plus the caller's
//! owner scope and returns either a value or a [`postdeck_core::Notification`]
//! ready to show.

mod calendar;
mod captions;
mod reminders;

pub use calendar::*;
pub use captions::*;
pub use reminders::*;

pub use crate::utils::command_helpers::CommandResult;
