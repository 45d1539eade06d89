//! In-memory document store
//!
//! Documents are kept per owner in insertion order; an upsert replaces a
//! document in place so reconciled ordering stays stable across edits.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use postdeck_core::{LegacyEventRepository, PostRepository, ReminderRepository};
use postdeck_domain::{CalendarEvent, OwnerScope, Post, Reminder, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::errors::InfraError;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Which collection a write touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Reminders,
    LegacyEvents,
}

/// Pushed to subscribers after every successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub owner: OwnerScope,
    pub collection: Collection,
    pub document_id: String,
}

/// Serialized form of one owner's documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub posts: Vec<Post>,
    pub reminders: Vec<Reminder>,
    pub legacy_events: Vec<CalendarEvent>,
}

impl StoreSnapshot {
    /// Read a snapshot from a JSON file.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(InfraError::from)?;
        let snapshot: Self = serde_json::from_slice(&bytes).map_err(InfraError::from)?;
        info!(
            path = %path.display(),
            posts = snapshot.posts.len(),
            reminders = snapshot.reminders.len(),
            legacy_events = snapshot.legacy_events.len(),
            "Loaded store snapshot"
        );
        Ok(snapshot)
    }
}

/// Document store held in process memory.
pub struct InMemoryDocumentStore {
    owners: RwLock<HashMap<OwnerScope, StoreSnapshot>>,
    changes: broadcast::Sender<StoreChange>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { owners: RwLock::new(HashMap::new()), changes }
    }

    /// Store seeded with `snapshot` for one owner.
    pub fn from_snapshot(owner: OwnerScope, snapshot: StoreSnapshot) -> Self {
        let store = Self::new();
        store.owners.write().insert(owner, snapshot);
        store
    }

    /// Receive every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    /// Copy of everything `owner` has stored.
    pub fn snapshot(&self, owner: &OwnerScope) -> StoreSnapshot {
        self.owners.read().get(owner).cloned().unwrap_or_default()
    }

    fn read<T>(&self, owner: &OwnerScope, f: impl FnOnce(&StoreSnapshot) -> T) -> Option<T> {
        self.owners.read().get(owner).map(f)
    }

    fn write(
        &self,
        owner: &OwnerScope,
        collection: Collection,
        document_id: &str,
        f: impl FnOnce(&mut StoreSnapshot),
    ) {
        {
            let mut owners = self.owners.write();
            f(owners.entry(owner.clone()).or_default());
        }
        debug!(%owner, ?collection, document_id, "Document store write");
        // No subscribers is fine.
        let _ = self.changes.send(StoreChange {
            owner: owner.clone(),
            collection,
            document_id: document_id.to_string(),
        });
    }
}

fn upsert_by_id<T>(documents: &mut Vec<T>, document: T, id: impl Fn(&T) -> &str) {
    match documents.iter().position(|existing| id(existing) == id(&document)) {
        Some(index) => documents[index] = document,
        None => documents.push(document),
    }
}

#[async_trait]
impl PostRepository for InMemoryDocumentStore {
    async fn list_posts(&self, scope: &OwnerScope) -> Result<Vec<Post>> {
        Ok(self.read(scope, |docs| docs.posts.clone()).unwrap_or_default())
    }

    async fn get_post(&self, scope: &OwnerScope, post_id: &str) -> Result<Option<Post>> {
        Ok(self.read(scope, |docs| docs.posts.iter().find(|p| p.id == post_id).cloned()).flatten())
    }

    async fn upsert_post(&self, scope: &OwnerScope, post: Post) -> Result<()> {
        let id = post.id.clone();
        self.write(scope, Collection::Posts, &id, |docs| {
            upsert_by_id(&mut docs.posts, post, |p| p.id.as_str());
        });
        Ok(())
    }

    async fn delete_post(&self, scope: &OwnerScope, post_id: &str) -> Result<()> {
        self.write(scope, Collection::Posts, post_id, |docs| {
            docs.posts.retain(|p| p.id != post_id);
        });
        Ok(())
    }
}

#[async_trait]
impl ReminderRepository for InMemoryDocumentStore {
    async fn list_reminders(&self, scope: &OwnerScope) -> Result<Vec<Reminder>> {
        Ok(self.read(scope, |docs| docs.reminders.clone()).unwrap_or_default())
    }

    async fn upsert_reminder(&self, scope: &OwnerScope, reminder: Reminder) -> Result<()> {
        let id = reminder.id.clone();
        self.write(scope, Collection::Reminders, &id, |docs| {
            upsert_by_id(&mut docs.reminders, reminder, |r| r.id.as_str());
        });
        Ok(())
    }

    async fn delete_reminder(&self, scope: &OwnerScope, reminder_id: &str) -> Result<()> {
        self.write(scope, Collection::Reminders, reminder_id, |docs| {
            docs.reminders.retain(|r| r.id != reminder_id);
        });
        Ok(())
    }
}

#[async_trait]
impl LegacyEventRepository for InMemoryDocumentStore {
    async fn list_legacy_events(&self, scope: &OwnerScope) -> Result<Vec<CalendarEvent>> {
        Ok(self.read(scope, |docs| docs.legacy_events.clone()).unwrap_or_default())
    }

    async fn upsert_legacy_event(&self, scope: &OwnerScope, event: CalendarEvent) -> Result<()> {
        let id = event.id.clone();
        self.write(scope, Collection::LegacyEvents, &id, |docs| {
            upsert_by_id(&mut docs.legacy_events, event, |e| e.id.as_str());
        });
        Ok(())
    }

    async fn delete_legacy_event(&self, scope: &OwnerScope, event_id: &str) -> Result<()> {
        self.write(scope, Collection::LegacyEvents, event_id, |docs| {
            docs.legacy_events.retain(|e| e.id != event_id);
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use postdeck_domain::{PostStatus, PostdeckError};
    use tempfile::NamedTempFile;

    use super::*;

    fn post(id: &str, content: &str) -> Post {
        let mut post = Post::new(id);
        post.content = Some(content.to_string());
        post.status = PostStatus::Scheduled;
        post
    }

    #[tokio::test]
    async fn upsert_replaces_in_place_and_is_idempotent() {
        let store = InMemoryDocumentStore::new();
        let owner = OwnerScope::new("u1");

        store.upsert_post(&owner, post("a", "first")).await.unwrap();
        store.upsert_post(&owner, post("b", "second")).await.unwrap();
        store.upsert_post(&owner, post("a", "edited")).await.unwrap();
        store.upsert_post(&owner, post("a", "edited")).await.unwrap();

        let posts = store.list_posts(&owner).await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(posts[0].content.as_deref(), Some("edited"));
    }

    #[tokio::test]
    async fn owners_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store.upsert_post(&OwnerScope::new("u1"), post("a", "mine")).await.unwrap();

        assert!(store.list_posts(&OwnerScope::new("u2")).await.unwrap().is_empty());
        assert!(store.get_post(&OwnerScope::new("u2"), "a").await.unwrap().is_none());
        assert!(store.get_post(&OwnerScope::new("u1"), "a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_missing_documents_succeeds() {
        let store = InMemoryDocumentStore::new();
        let owner = OwnerScope::new("u1");
        store.delete_post(&owner, "ghost").await.unwrap();
        store.delete_reminder(&owner, "ghost").await.unwrap();
        store.delete_legacy_event(&owner, "ghost").await.unwrap();
    }

    #[tokio::test]
    async fn writes_are_broadcast_to_subscribers() {
        let store = InMemoryDocumentStore::new();
        let owner = OwnerScope::new("u1");
        let mut changes = store.subscribe();

        store.upsert_post(&owner, post("a", "hello")).await.unwrap();
        store.delete_reminder(&owner, "r1").await.unwrap();

        assert_eq!(
            changes.recv().await.unwrap(),
            StoreChange {
                owner: owner.clone(),
                collection: Collection::Posts,
                document_id: "a".to_string()
            }
        );
        assert_eq!(changes.recv().await.unwrap().collection, Collection::Reminders);
    }

    #[tokio::test]
    async fn reads_snapshot_files() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "posts": [{ "id": "p1", "scheduledDate": "2024-03-05T14:00:00Z",
                            "platforms": ["Instagram"], "status": "In Review" }],
                "legacyEvents": [{ "id": "cal-p1-old", "title": "Old", "date": "2024-03-01",
                                   "type": "post", "platform": "Instagram", "status": "Published" }]
            }"#,
        )
        .unwrap();

        let snapshot = StoreSnapshot::read(file.path()).await.expect("snapshot");
        assert_eq!(snapshot.posts[0].status, PostStatus::InReview);
        assert_eq!(snapshot.legacy_events[0].id, "cal-p1-old");
        assert!(snapshot.reminders.is_empty());

        let owner = OwnerScope::new("u1");
        let store = InMemoryDocumentStore::from_snapshot(owner.clone(), snapshot.clone());
        assert_eq!(store.snapshot(&owner), snapshot);
    }

    #[tokio::test]
    async fn missing_snapshot_is_not_found() {
        let err = StoreSnapshot::read("/nonexistent/snapshot.json").await.unwrap_err();
        assert!(matches!(err, PostdeckError::NotFound(_)));
    }
}
