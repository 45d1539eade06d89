//! Port interfaces for the document and blob stores
//!
//! Every document call is restricted to one owner. Upserts and deletes are
//! idempotent and keyed by document id; deleting a missing id succeeds.

use async_trait::async_trait;
use postdeck_domain::{CalendarEvent, OwnerScope, Post, Reminder, Result};

/// Posts written by the composer.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Snapshot of all posts owned by `scope`
    async fn list_posts(&self, scope: &OwnerScope) -> Result<Vec<Post>>;

    /// Fetch a single post
    async fn get_post(&self, scope: &OwnerScope, post_id: &str) -> Result<Option<Post>>;

    /// Insert or replace a post by id
    async fn upsert_post(&self, scope: &OwnerScope, post: Post) -> Result<()>;

    /// Delete a post by id
    async fn delete_post(&self, scope: &OwnerScope, post_id: &str) -> Result<()>;
}

/// User reminders.
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn list_reminders(&self, scope: &OwnerScope) -> Result<Vec<Reminder>>;

    async fn upsert_reminder(&self, scope: &OwnerScope, reminder: Reminder) -> Result<()>;

    async fn delete_reminder(&self, scope: &OwnerScope, reminder_id: &str) -> Result<()>;
}

/// Calendar documents from the older schema.
#[async_trait]
pub trait LegacyEventRepository: Send + Sync {
    async fn list_legacy_events(&self, scope: &OwnerScope) -> Result<Vec<CalendarEvent>>;

    async fn upsert_legacy_event(&self, scope: &OwnerScope, event: CalendarEvent) -> Result<()>;

    async fn delete_legacy_event(&self, scope: &OwnerScope, event_id: &str) -> Result<()>;
}

/// Media attachment storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `path` and return a URL that `download` accepts
    async fn upload(&self, bytes: Vec<u8>, path: &str) -> Result<String>;

    /// Fetch the bytes behind a URL returned by `upload`
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}
