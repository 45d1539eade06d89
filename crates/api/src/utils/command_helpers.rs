//! Command execution helpers
//!
//! Every command runs through [`execute_command`] so timing, logging and the
//! error-to-notification mapping stay uniform.

use std::future::Future;
use std::time::Instant;

use postdeck_core::Notification;
use postdeck_domain::Result as DomainResult;

use crate::utils::logging::log_command_execution;

/// Command result as the UI sees it: a value or a notification to show.
pub type CommandResult<T> = std::result::Result<T, Notification>;

/// Execute a command with timing, logging and notification mapping
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext, owner: &OwnerScope) -> CommandResult<MyResponse> {
///     execute_command("my_module::my_command", || async {
///         ctx.calendar.do_something(owner).await
///     })
///     .await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> CommandResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());

    result.map_err(|err| Notification::from_error(&err))
}
