//! Reminder commands

use chrono::Utc;
use postdeck_core::{Notification, ReminderDraft};
use postdeck_domain::{OwnerScope, Reminder, ReminderType};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::utils::command_helpers::{execute_command, CommandResult};
use crate::AppContext;

/// Reminder form fields as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderInput {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub reminder_type: ReminderType,
    pub description: Option<String>,
}

impl From<ReminderInput> for ReminderDraft {
    fn from(input: ReminderInput) -> Self {
        Self {
            title: input.title,
            date: input.date,
            time: input.time,
            reminder_type: input.reminder_type,
            description: input.description,
        }
    }
}

pub async fn create_reminder(
    ctx: &AppContext,
    owner: &OwnerScope,
    input: ReminderInput,
) -> CommandResult<Reminder> {
    execute_command("reminders::create_reminder", || {
        ctx.calendar.create_reminder(owner, input.into(), Utc::now())
    })
    .await
}

pub async fn update_reminder(
    ctx: &AppContext,
    owner: &OwnerScope,
    reminder_id: String,
    input: ReminderInput,
) -> CommandResult<Reminder> {
    execute_command("reminders::update_reminder", || {
        ctx.calendar.update_reminder(owner, &reminder_id, input.into())
    })
    .await
}

pub async fn delete_reminder(
    ctx: &AppContext,
    owner: &OwnerScope,
    reminder_id: String,
) -> CommandResult<Notification> {
    execute_command("reminders::delete_reminder", || async {
        ctx.calendar.delete_reminder(owner, &reminder_id).await?;
        Ok(Notification::success("Reminder deleted"))
    })
    .await
}
