//! Application context - dependency injection container
//!
//! Wires the document store, blob store and generation client into the
//! calendar and caption services. Commands receive the context by reference.

use std::sync::Arc;

use postdeck_core::calendar::parse_timezone;
use postdeck_core::{CalendarService, CaptionService, EditSessions, ReconcileOptions};
use postdeck_domain::{Config, OwnerScope, Result};
use postdeck_infra::{
    CalendarFeed, GenerationClient, InMemoryDocumentStore, LocalBlobStore, StoreSnapshot,
};
use tracing::{info, instrument};

/// Application context - holds every service commands need
pub struct AppContext {
    pub config: Config,
    pub store: Arc<InMemoryDocumentStore>,
    pub blobs: Arc<LocalBlobStore>,
    pub calendar: Arc<CalendarService>,
    pub captions: Arc<CaptionService>,
    pub sessions: Arc<EditSessions>,
}

impl AppContext {
    /// Create a context with default configuration and an empty store
    pub fn new() -> Result<Self> {
        Self::new_with_config(Config::default())
    }

    /// Create a context with custom configuration and an empty store
    pub fn new_with_config(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(InMemoryDocumentStore::new()))
    }

    /// Create a context whose store is seeded with one owner's snapshot
    pub fn with_snapshot(
        config: Config,
        owner: OwnerScope,
        snapshot: StoreSnapshot,
    ) -> Result<Self> {
        Self::with_store(config, Arc::new(InMemoryDocumentStore::from_snapshot(owner, snapshot)))
    }

    #[instrument(skip_all, fields(timezone = %config.calendar.timezone))]
    fn with_store(config: Config, store: Arc<InMemoryDocumentStore>) -> Result<Self> {
        let timezone = parse_timezone(&config.calendar.timezone)?;
        let blobs = Arc::new(LocalBlobStore::new(&config.storage.blob_root)?);
        let generator = Arc::new(GenerationClient::from_config(&config.generation)?);
        let sessions = Arc::new(EditSessions::new());

        let calendar = Arc::new(
            CalendarService::new(store.clone(), store.clone(), store.clone())
                .with_options(ReconcileOptions::from(&config.calendar))
                .with_timezone(timezone),
        );
        let captions = Arc::new(
            CaptionService::new(store.clone(), generator, sessions.clone())
                .with_blob_store(blobs.clone()),
        );

        info!(
            blob_root = %blobs.root().display(),
            generation_url = %config.generation.base_url,
            "Application context initialised"
        );

        Ok(Self { config, store, blobs, calendar, captions, sessions })
    }

    /// Live calendar feed for `owner`; the caller starts and stops it.
    pub fn calendar_feed(&self, owner: OwnerScope) -> CalendarFeed {
        CalendarFeed::new(self.calendar.clone(), self.store.clone(), owner)
    }
}
