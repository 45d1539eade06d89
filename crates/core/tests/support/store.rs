use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use postdeck_core::{BlobStore, LegacyEventRepository, PostRepository, ReminderRepository};
use postdeck_domain::{
    CalendarEvent, OwnerScope, Post, PostdeckError, Reminder, Result as DomainResult,
};

/// Write recorded by [`MockStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    UpsertPost(Post),
    DeletePost(String),
    UpsertReminder(Reminder),
    DeleteReminder(String),
    UpsertLegacy(CalendarEvent),
    DeleteLegacy(String),
}

/// In-memory mock for all three document repositories.
///
/// Ignores owner scopes, records every write and can be told to fail all
/// calls with a store error.
#[derive(Default, Clone)]
pub struct MockStore {
    posts: Arc<Mutex<Vec<Post>>>,
    reminders: Arc<Mutex<Vec<Reminder>>>,
    legacy: Arc<Mutex<Vec<CalendarEvent>>>,
    writes: Arc<Mutex<Vec<Write>>>,
    offline: Arc<Mutex<bool>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(self, post: Post) -> Self {
        self.posts.lock().unwrap().push(post);
        self
    }

    pub fn with_reminder(self, reminder: Reminder) -> Self {
        self.reminders.lock().unwrap().push(reminder);
        self
    }

    pub fn with_legacy(self, event: CalendarEvent) -> Self {
        self.legacy.lock().unwrap().push(event);
        self
    }

    /// Make every subsequent call fail.
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    pub fn reminders(&self) -> Vec<Reminder> {
        self.reminders.lock().unwrap().clone()
    }

    pub fn legacy(&self) -> Vec<CalendarEvent> {
        self.legacy.lock().unwrap().clone()
    }

    fn check_online(&self) -> DomainResult<()> {
        if *self.offline.lock().unwrap() {
            return Err(PostdeckError::Store("mock store offline".to_string()));
        }
        Ok(())
    }

    fn record(&self, write: Write) {
        self.writes.lock().unwrap().push(write);
    }
}

fn upsert_by_id<T: Clone>(items: &mut Vec<T>, item: T, id: impl Fn(&T) -> &str) {
    let key = id(&item).to_string();
    match items.iter_mut().find(|existing| id(existing) == key) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

#[async_trait]
impl PostRepository for MockStore {
    async fn list_posts(&self, _scope: &OwnerScope) -> DomainResult<Vec<Post>> {
        self.check_online()?;
        Ok(self.posts())
    }

    async fn get_post(&self, _scope: &OwnerScope, post_id: &str) -> DomainResult<Option<Post>> {
        self.check_online()?;
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == post_id).cloned())
    }

    async fn upsert_post(&self, _scope: &OwnerScope, post: Post) -> DomainResult<()> {
        self.check_online()?;
        self.record(Write::UpsertPost(post.clone()));
        upsert_by_id(&mut self.posts.lock().unwrap(), post, |p| p.id.as_str());
        Ok(())
    }

    async fn delete_post(&self, _scope: &OwnerScope, post_id: &str) -> DomainResult<()> {
        self.check_online()?;
        self.record(Write::DeletePost(post_id.to_string()));
        self.posts.lock().unwrap().retain(|p| p.id != post_id);
        Ok(())
    }
}

#[async_trait]
impl ReminderRepository for MockStore {
    async fn list_reminders(&self, _scope: &OwnerScope) -> DomainResult<Vec<Reminder>> {
        self.check_online()?;
        Ok(self.reminders())
    }

    async fn upsert_reminder(&self, _scope: &OwnerScope, reminder: Reminder) -> DomainResult<()> {
        self.check_online()?;
        self.record(Write::UpsertReminder(reminder.clone()));
        upsert_by_id(&mut self.reminders.lock().unwrap(), reminder, |r| r.id.as_str());
        Ok(())
    }

    async fn delete_reminder(&self, _scope: &OwnerScope, reminder_id: &str) -> DomainResult<()> {
        self.check_online()?;
        self.record(Write::DeleteReminder(reminder_id.to_string()));
        self.reminders.lock().unwrap().retain(|r| r.id != reminder_id);
        Ok(())
    }
}

#[async_trait]
impl LegacyEventRepository for MockStore {
    async fn list_legacy_events(&self, _scope: &OwnerScope) -> DomainResult<Vec<CalendarEvent>> {
        self.check_online()?;
        Ok(self.legacy())
    }

    async fn upsert_legacy_event(
        &self,
        _scope: &OwnerScope,
        event: CalendarEvent,
    ) -> DomainResult<()> {
        self.check_online()?;
        self.record(Write::UpsertLegacy(event.clone()));
        upsert_by_id(&mut self.legacy.lock().unwrap(), event, |e| e.id.as_str());
        Ok(())
    }

    async fn delete_legacy_event(&self, _scope: &OwnerScope, event_id: &str) -> DomainResult<()> {
        self.check_online()?;
        self.record(Write::DeleteLegacy(event_id.to_string()));
        self.legacy.lock().unwrap().retain(|e| e.id != event_id);
        Ok(())
    }
}

/// In-memory mock for `BlobStore` returning `mem://` URLs.
#[derive(Default, Clone)]
pub struct MockBlobStore {
    blobs: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockBlobStore {
    pub fn paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn upload(&self, bytes: Vec<u8>, path: &str) -> DomainResult<String> {
        self.blobs.lock().unwrap().push((path.to_string(), bytes));
        Ok(format!("mem://{path}"))
    }

    async fn download(&self, url: &str) -> DomainResult<Vec<u8>> {
        let path = url.trim_start_matches("mem://");
        self.blobs
            .lock()
            .unwrap()
            .iter()
            .find(|(stored, _)| stored == path)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| PostdeckError::NotFound(url.to_string()))
    }
}
