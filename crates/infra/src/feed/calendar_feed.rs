//! Push-based calendar invalidation.
//!
//! The feed subscribes to store changes for one owner and publishes the
//! freshly reconciled event list over a `watch` channel after each change.
//! Join handles are tracked, cancellation is explicit, and shutdown is
//! bounded by a timeout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use postdeck_core::CalendarService;
//! use postdeck_domain::OwnerScope;
//! use postdeck_infra::feed::{CalendarFeed, FeedResult};
//! use postdeck_infra::store::InMemoryDocumentStore;
//!
//! # async fn example() -> FeedResult<()> {
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let service = Arc::new(CalendarService::new(store.clone(), store.clone(), store.clone()));
//!
//! let mut feed = CalendarFeed::new(service, store, OwnerScope::new("u1"));
//! feed.start().await?;
//! let mut events = feed.subscribe();
//! events.changed().await.ok();
//! println!("{} events", events.borrow().len());
//! feed.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use postdeck_core::CalendarService;
use postdeck_domain::{CalendarEvent, OwnerScope};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::error::{FeedError, FeedResult};
use crate::store::{InMemoryDocumentStore, StoreChange};

/// Configuration for the calendar feed.
#[derive(Debug, Clone)]
pub struct CalendarFeedConfig {
    /// Timeout for the first reconciliation in `start`.
    pub load_timeout: Duration,
    /// Timeout for awaiting the refresh task in `stop`.
    pub join_timeout: Duration,
}

impl Default for CalendarFeedConfig {
    fn default() -> Self {
        Self { load_timeout: Duration::from_secs(10), join_timeout: Duration::from_secs(5) }
    }
}

/// Live, reconciled view of one owner's calendar.
pub struct CalendarFeed {
    service: Arc<CalendarService>,
    store: Arc<InMemoryDocumentStore>,
    owner: OwnerScope,
    config: CalendarFeedConfig,
    events: watch::Sender<Vec<CalendarEvent>>,
    refresh_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
}

impl CalendarFeed {
    /// Create a feed with the default configuration.
    pub fn new(
        service: Arc<CalendarService>,
        store: Arc<InMemoryDocumentStore>,
        owner: OwnerScope,
    ) -> Self {
        Self::with_config(service, store, owner, CalendarFeedConfig::default())
    }

    /// Create a feed with a custom configuration.
    pub fn with_config(
        service: Arc<CalendarService>,
        store: Arc<InMemoryDocumentStore>,
        owner: OwnerScope,
        config: CalendarFeedConfig,
    ) -> Self {
        let (events, _) = watch::channel(Vec::new());
        Self {
            service,
            store,
            owner,
            config,
            events,
            refresh_handle: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Reconcile once, then keep refreshing on every store change.
    ///
    /// # Errors
    /// `AlreadyRunning` when started twice, `InitialLoad` or `Timeout` when
    /// the first reconciliation fails. The feed is not running afterwards.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub async fn start(&mut self) -> FeedResult<()> {
        if self.is_running() {
            return Err(FeedError::AlreadyRunning);
        }

        // Subscribe first so writes racing the initial load still trigger a refresh.
        let changes = self.store.subscribe();

        let load_timeout = self.config.load_timeout;
        let initial = tokio::time::timeout(load_timeout, self.service.load_events(&self.owner))
            .await
            .map_err(|_| FeedError::Timeout { seconds: load_timeout.as_secs() })?
            .map_err(FeedError::InitialLoad)?;
        self.events.send_replace(initial);

        self.cancellation = CancellationToken::new();
        let handle = tokio::spawn(refresh_loop(
            self.service.clone(),
            self.owner.clone(),
            changes,
            self.events.clone(),
            self.cancellation.clone(),
        ));
        self.refresh_handle = Some(handle);

        info!("Calendar feed started");
        Ok(())
    }

    /// Stop refreshing and wait for the refresh task to finish.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub async fn stop(&mut self) -> FeedResult<()> {
        let handle = self.refresh_handle.take().ok_or(FeedError::NotRunning)?;

        self.cancellation.cancel();

        let join_timeout = self.config.join_timeout;
        tokio::time::timeout(join_timeout, handle)
            .await
            .map_err(|_| FeedError::Timeout { seconds: join_timeout.as_secs() })?
            .map_err(|e| FeedError::TaskJoinFailed(e.to_string()))?;

        info!("Calendar feed stopped");
        Ok(())
    }

    /// Returns true while the refresh task is active.
    pub fn is_running(&self) -> bool {
        self.refresh_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Receiver that observes every published event list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CalendarEvent>> {
        self.events.subscribe()
    }

    /// Most recently published event list.
    pub fn latest(&self) -> Vec<CalendarEvent> {
        self.events.borrow().clone()
    }

    pub fn owner(&self) -> &OwnerScope {
        &self.owner
    }
}

impl Drop for CalendarFeed {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

async fn refresh_loop(
    service: Arc<CalendarService>,
    owner: OwnerScope,
    mut changes: broadcast::Receiver<StoreChange>,
    events: watch::Sender<Vec<CalendarEvent>>,
    cancel: CancellationToken,
) {
    loop {
        let change = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(%owner, "Calendar feed cancelled");
                break;
            }
            change = changes.recv() => change,
        };

        match change {
            Ok(change) if change.owner != owner => continue,
            Ok(change) => {
                debug!(
                    %owner,
                    collection = ?change.collection,
                    id = %change.document_id,
                    "Store changed"
                );
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(%owner, skipped, "Calendar feed lagged behind store changes");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!(%owner, "Store change channel closed");
                break;
            }
        }

        // A failed refresh keeps the last good list on screen.
        match service.load_events(&owner).await {
            Ok(latest) => {
                events.send_replace(latest);
            }
            Err(err) => warn!(%owner, error = %err, "Calendar refresh failed"),
        }
    }
}
