//! Configuration structures
//!
//! Loading lives in `postdeck-infra`; this module only defines the shape and
//! the defaults. Every section is optional in files.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXCLUDED_PLATFORMS, DEFAULT_GENERATION_BASE_URL, DEFAULT_GENERATION_MAX_ATTEMPTS,
    DEFAULT_GENERATION_TIMEOUT_SECS, DEFAULT_TITLE_PREVIEW_LENGTH,
};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Calendar projection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Platforms kept off the main calendar (ASCII case-insensitive).
    pub excluded_platforms: Vec<String>,
    /// IANA zone of the displayed calendar, e.g. `"Europe/Berlin"`.
    pub timezone: String,
    pub title_preview_length: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            excluded_platforms: DEFAULT_EXCLUDED_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            timezone: "UTC".to_string(),
            title_preview_length: DEFAULT_TITLE_PREVIEW_LENGTH,
        }
    }
}

/// Remote caption generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GENERATION_BASE_URL.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_GENERATION_TIMEOUT_SECS,
            max_attempts: DEFAULT_GENERATION_MAX_ATTEMPTS,
        }
    }
}

/// Media storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub blob_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { blob_root: "media".to_string() }
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
