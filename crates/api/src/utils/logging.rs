use std::time::Duration;

use postdeck_domain::{LoggingConfig, PostdeckError, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level` when set. Output is human-readable
/// unless `config.json` is true.
///
/// # Errors
/// `PostdeckError::Config` when the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(&config.level),
    }
    .map_err(|err| PostdeckError::Config(format!("invalid log filter: {err}")))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.compact().try_init()
    };

    installed.map_err(|err| PostdeckError::Config(format!("logging already initialised: {err}")))
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"calendar::get_month_view"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - Failure, if any.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&PostdeckError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert a `PostdeckError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &PostdeckError) -> &'static str {
    match error {
        PostdeckError::Store(_) => "store",
        PostdeckError::Config(_) => "config",
        PostdeckError::Network(_) => "network",
        PostdeckError::Auth(_) => "auth",
        PostdeckError::NotFound(_) => "not_found",
        PostdeckError::InvalidInput(_) => "invalid_input",
        PostdeckError::Validation { .. } => "validation",
        PostdeckError::EmptyResult(_) => "empty_result",
        PostdeckError::Internal(_) => "internal",
    }
}
