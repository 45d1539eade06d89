//! User-facing notifications
//!
//! Collaborator failures reach the user as dismissible notifications. The
//! wording depends on whether retrying the same action can help.

use postdeck_domain::PostdeckError;
use serde::{Deserialize, Serialize};

/// Severity shown by the toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Message for the notification area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Retrying the identical action may succeed.
    pub retryable: bool,
    pub dismissible: bool,
    /// Form field the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), retryable: false, dismissible: true, field: None }
    }

    /// Map an operation failure to what the user should see.
    pub fn from_error(error: &PostdeckError) -> Self {
        let mut notification = Self::new(NotificationLevel::Error, String::new());
        match error {
            PostdeckError::Network(_) | PostdeckError::Store(_) => {
                notification.message =
                    "Could not reach the service. Please try again.".to_string();
                notification.retryable = true;
            }
            PostdeckError::EmptyResult(_) => {
                notification.message =
                    "No usable result. Try again with different input.".to_string();
            }
            PostdeckError::Validation { field, message } => {
                notification.message = message.clone();
                notification.field = Some(field.clone());
            }
            PostdeckError::NotFound(_) => {
                notification.message = "This item no longer exists.".to_string();
            }
            PostdeckError::Auth(_) => {
                notification.message =
                    "Your session has expired. Please sign in again.".to_string();
            }
            PostdeckError::InvalidInput(message) => {
                notification.message = message.clone();
            }
            PostdeckError::Config(_) | PostdeckError::Internal(_) => {
                notification.message = "Something went wrong. Please try again later.".to_string();
            }
        }
        notification
    }
}

impl From<&PostdeckError> for Notification {
    fn from(error: &PostdeckError) -> Self {
        Self::from_error(error)
    }
}
