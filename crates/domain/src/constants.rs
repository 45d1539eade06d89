//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Calendar event id prefixes
pub const POST_EVENT_PREFIX: &str = "post-";
pub const LEGACY_EVENT_PREFIX: &str = "cal-";
pub const REMINDER_EVENT_PREFIX: &str = "reminder-";
pub const EVENT_ID_SEPARATOR: char = '-';

/// Platform placeholder carried by reminder-derived events.
pub const REMINDER_PLATFORM: &str = "Reminder";

/// Platforms that get their own calendar view and never appear on the main one.
pub const DEFAULT_EXCLUDED_PLATFORMS: [&str; 1] = ["OnlyFans"];

// Title previews
pub const DEFAULT_TITLE_PREVIEW_LENGTH: usize = 30;
pub const TITLE_TRUNCATE_SUFFIX: &str = "...";
pub const UNTITLED_POST_TITLE: &str = "Untitled post";

// Defaults for the generation service
pub const DEFAULT_GENERATION_BASE_URL: &str = "http://127.0.0.1:5001/api";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_GENERATION_MAX_ATTEMPTS: usize = 2;
