//! # Postdeck Domain
//!
//! Business domain types and models for the Postdeck content calendar.
//!
//! This crate contains:
//! - Document types (Post, Reminder, CalendarEvent) as the store persists them
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Calendar event id synthesis and legacy id parsing
//!
//! ## Architecture
//! - No dependencies on other Postdeck crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export association helpers
pub use utils::event_id::{
    post_event_id, reminder_event_id, resolve_association, AssociationSource, EventAssociation,
};
