//! Edit-session request tracking
//!
//! Each open edit modal is a session. Starting a request inside a session
//! supersedes earlier ones, and closing the session supersedes everything.
//! A late result is applied only when its ticket is still current.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one open edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Handle for one in-flight request inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    session: SessionId,
    generation: u64,
}

impl RequestTicket {
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// Registry of open sessions and their latest request.
#[derive(Debug, Default)]
pub struct EditSessions {
    latest: Mutex<HashMap<SessionId, u64>>,
}

impl EditSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for a newly shown modal.
    pub fn open(&self) -> SessionId {
        let session = SessionId(Uuid::new_v4());
        self.latest.lock().insert(session, 0);
        session
    }

    /// Start a request, superseding earlier tickets of the same session.
    ///
    /// Tickets issued for a closed or unknown session are never current.
    pub fn begin_request(&self, session: SessionId) -> RequestTicket {
        let mut latest = self.latest.lock();
        match latest.get_mut(&session) {
            Some(generation) => {
                *generation += 1;
                RequestTicket { session, generation: *generation }
            }
            None => RequestTicket { session, generation: u64::MAX },
        }
    }

    /// Close a session; all of its tickets stop being current.
    pub fn close(&self, session: SessionId) {
        self.latest.lock().remove(&session);
    }

    /// Whether the ticket is still the active request of an open session.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.lock().get(&ticket.session).is_some_and(|latest| *latest == ticket.generation)
    }

    /// Number of open sessions.
    pub fn open_count(&self) -> usize {
        self.latest.lock().len()
    }
}
