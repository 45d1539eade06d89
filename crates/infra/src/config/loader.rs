//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `POSTDECK_GENERATION_BASE_URL`: Base URL of the caption generation service
//! - `POSTDECK_BLOB_ROOT`: Directory backing the local blob store
//!
//! Optional (defaults from [`Config::default`]):
//! - `POSTDECK_GENERATION_API_KEY`: Bearer token for the generation service
//! - `POSTDECK_GENERATION_TIMEOUT`: Request timeout in seconds
//! - `POSTDECK_GENERATION_MAX_ATTEMPTS`: Attempts per generation request
//! - `POSTDECK_EXCLUDED_PLATFORMS`: Comma-separated platform tags
//! - `POSTDECK_TIMEZONE`: IANA zone of the displayed calendar
//! - `POSTDECK_TITLE_PREVIEW_LENGTH`: Characters kept in event titles
//! - `POSTDECK_LOG_LEVEL`: Default tracing filter
//! - `POSTDECK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./postdeck.json` or `./postdeck.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use postdeck_domain::{
    CalendarConfig, Config, GenerationConfig, LoggingConfig, PostdeckError, Result, StorageConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PostdeckError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PostdeckError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let base_url = env_var("POSTDECK_GENERATION_BASE_URL")?;
    url::Url::parse(&base_url).map_err(|e| {
        PostdeckError::Config(format!("Invalid generation base URL '{}': {}", base_url, e))
    })?;
    let blob_root = env_var("POSTDECK_BLOB_ROOT")?;

    let generation = GenerationConfig {
        base_url,
        api_key: std::env::var("POSTDECK_GENERATION_API_KEY").ok().filter(|k| !k.is_empty()),
        timeout_seconds: env_parse(
            "POSTDECK_GENERATION_TIMEOUT",
            defaults.generation.timeout_seconds,
        )?,
        max_attempts: env_parse(
            "POSTDECK_GENERATION_MAX_ATTEMPTS",
            defaults.generation.max_attempts,
        )?,
    };

    let calendar = CalendarConfig {
        excluded_platforms: std::env::var("POSTDECK_EXCLUDED_PLATFORMS")
            .ok()
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.calendar.excluded_platforms),
        timezone: std::env::var("POSTDECK_TIMEZONE").unwrap_or(defaults.calendar.timezone),
        title_preview_length: env_parse(
            "POSTDECK_TITLE_PREVIEW_LENGTH",
            defaults.calendar.title_preview_length,
        )?,
    };

    let logging = LoggingConfig {
        level: std::env::var("POSTDECK_LOG_LEVEL").unwrap_or(defaults.logging.level),
        json: env_bool("POSTDECK_LOG_JSON", defaults.logging.json),
    };

    Ok(Config { calendar, generation, storage: StorageConfig { blob_root }, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PostdeckError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PostdeckError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PostdeckError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PostdeckError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PostdeckError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PostdeckError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PostdeckError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("postdeck.json"),
        dir.join("postdeck.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `PostdeckError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        PostdeckError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PostdeckError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_string).collect()
}
