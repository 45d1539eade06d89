//! Pure helpers shared by the calendar layers

pub mod dates;
pub mod event_id;
pub mod title;
