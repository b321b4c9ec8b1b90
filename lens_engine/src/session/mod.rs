//! In-memory session store.
//!
//! Each session sits behind its own mutex inside a map guarded by a
//! read-write lock: lookups share the map, and mutation of one session never
//! blocks another.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use lens_catalog::SovereigntyId;

use crate::lens::LensOutputs;
use crate::observer::InsightRecord;

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `process` request and what it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub text: String,
    pub lenses: Vec<String>,
    pub outputs: LensOutputs,
    pub created_at: DateTime<Utc>,
}

impl ProcessRecord {
    /// Record a request stamped with the current time.
    pub fn new(text: impl Into<String>, lenses: Vec<String>, outputs: LensOutputs) -> Self {
        Self {
            text: text.into(),
            lenses,
            outputs,
            created_at: Utc::now(),
        }
    }
}

/// Everything the engine remembers about one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: SessionId,

    /// Observed interactions so far. Never decreases.
    pub interaction_count: u64,

    /// Knowledge entries highlighted by the latest `process` observation.
    pub active_knowledge_ids: Vec<SovereigntyId>,

    /// Append-only; readers window it.
    pub insight_log: Vec<InsightRecord>,

    pub process_history: Vec<ProcessRecord>,

    pub created_at: DateTime<Utc>,
}

impl SessionState {
    /// An empty session stamped with the current time.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            interaction_count: 0,
            active_knowledge_ids: Vec::new(),
            insight_log: Vec::new(),
            process_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The last `window` insights, oldest first.
    pub fn recent_insights(&self, window: usize) -> &[InsightRecord] {
        let start = self.insight_log.len().saturating_sub(window);
        &self.insight_log[start..]
    }
}

/// Live sessions plus their creation order, updated together.
#[derive(Debug, Default)]
struct SessionMap {
    by_id: HashMap<SessionId, Arc<Mutex<SessionState>>>,
    /// Oldest at the front.
    order: VecDeque<SessionId>,
}

/// Owns every session's state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<SessionMap>,
    /// `None` keeps every session until the store is dropped.
    capacity: Option<usize>,
}

impl SessionStore {
    /// `capacity` bounds live sessions; `None` keeps them all.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            sessions: RwLock::new(SessionMap::default()),
            capacity,
        }
    }

    /// Start a fresh session, evicting the oldest one when at capacity.
    ///
    /// Never takes a session's own lock, so a caller may hold one while creating.
    pub fn create_session(&self) -> SessionId {
        let id = SessionId::new();
        let mut sessions = self.sessions.write();

        if let Some(capacity) = self.capacity {
            while sessions.by_id.len() >= capacity {
                let Some(oldest) = sessions.order.pop_front() else {
                    break;
                };
                sessions.by_id.remove(&oldest);
                info!(session = %oldest, capacity, "Evicted oldest session");
            }
        }

        sessions
            .by_id
            .insert(id, Arc::new(Mutex::new(SessionState::new(id))));
        sessions.order.push_back(id);
        debug!(session = %id, total = sessions.by_id.len(), "Created session");
        id
    }

    /// Whether the session is live.
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().by_id.contains_key(&id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().by_id.is_empty()
    }

    /// A copy of the session's current state.
    pub fn snapshot(&self, id: SessionId) -> Option<SessionState> {
        self.session(id).map(|session| session.lock().clone())
    }

    /// Read a session without cloning it.
    pub fn with_session<F, R>(&self, id: SessionId, f: F) -> Option<R>
    where
        F: FnOnce(&SessionState) -> R,
    {
        let session = self.session(id)?;
        let state = session.lock();
        Some(f(&state))
    }

    /// Mutate a session under its own lock. `None` when the session is unknown.
    pub fn with_session_mut<F, R>(&self, id: SessionId, f: F) -> Option<R>
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let session = self.session(id)?;
        let mut state = session.lock();
        Some(f(&mut state))
    }

    /// Append to a session's history. `false` when the session is unknown.
    pub fn record_process(&self, id: SessionId, record: ProcessRecord) -> bool {
        self.with_session_mut(id, |state| state.process_history.push(record))
            .is_some()
    }

    /// Oldest first; empty for unknown sessions.
    pub fn process_history(&self, id: SessionId) -> Vec<ProcessRecord> {
        self.with_session(id, |state| state.process_history.clone())
            .unwrap_or_default()
    }

    /// Drop a session. `false` when it was not live.
    pub fn remove(&self, id: SessionId) -> bool {
        let mut sessions = self.sessions.write();
        let removed = sessions.by_id.remove(&id).is_some();
        if removed {
            sessions.order.retain(|existing| *existing != id);
            debug!(session = %id, "Removed session");
        }
        removed
    }

    // Clone the handle so the map lock is released before the session lock is taken.
    fn session(&self, id: SessionId) -> Option<Arc<Mutex<SessionState>>> {
        self.sessions.read().by_id.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_create_and_snapshot() {
        let store = SessionStore::new(None);
        let id = store.create_session();

        assert!(store.contains(id));
        assert_eq!(store.len(), 1);

        let state = store.snapshot(id).unwrap();
        assert_eq!(state.session_id, id);
        assert_eq!(state.interaction_count, 0);
        assert!(state.insight_log.is_empty());
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new(None);
        let id = SessionId::new();

        assert!(store.snapshot(id).is_none());
        assert!(store.with_session_mut(id, |s| s.interaction_count += 1).is_none());
        assert!(!store.record_process(id, ProcessRecord::new("t", vec![], LensOutputs::new())));
        assert!(store.process_history(id).is_empty());
        assert!(!store.remove(id));
    }

    #[test]
    fn test_record_process_appends() {
        let store = SessionStore::new(None);
        let id = store.create_session();

        let first = ProcessRecord::new("first", vec!["ethical".into()], LensOutputs::new());
        let second = ProcessRecord::new("second", vec![], LensOutputs::new());
        assert!(store.record_process(id, first));
        assert!(store.record_process(id, second));

        let texts: Vec<_> = store.process_history(id).into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = SessionStore::new(Some(2));
        let first = store.create_session();
        let second = store.create_session();
        let third = store.create_session();

        assert_eq!(store.len(), 2);
        assert!(!store.contains(first));
        assert!(store.contains(second));
        assert!(store.contains(third));
    }

    #[test]
    fn test_eviction_follows_creation_order_after_remove() {
        let store = SessionStore::new(Some(2));
        let first = store.create_session();
        let second = store.create_session();
        assert!(store.remove(first));

        let third = store.create_session();
        let fourth = store.create_session();

        assert_eq!(store.len(), 2);
        assert!(!store.contains(second));
        assert!(store.contains(third));
        assert!(store.contains(fourth));
    }

    #[test]
    fn test_create_while_holding_session_lock() {
        let store = SessionStore::new(Some(1));
        let held = store.create_session();

        let created = store
            .with_session_mut(held, |state| {
                state.interaction_count += 1;
                store.create_session()
            })
            .unwrap();

        assert!(!store.contains(held));
        assert!(store.contains(created));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unbounded_by_default() {
        let store = SessionStore::new(None);
        for _ in 0..50 {
            store.create_session();
        }
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_recent_insights_window() {
        let mut state = SessionState::new(SessionId::new());
        for i in 0..7 {
            state.insight_log.push(InsightRecord::light(format!("S{}", i), "m"));
        }
        let recent: Vec<_> = state
            .recent_insights(5)
            .iter()
            .map(|r| r.sovereignty.as_str())
            .collect();
        assert_eq!(recent, vec!["S2", "S3", "S4", "S5", "S6"]);
        assert_eq!(state.recent_insights(10).len(), 7);
    }

    #[test]
    fn test_parallel_sessions() {
        let store = Arc::new(SessionStore::new(None));
        let ids: Vec<_> = (0..4).map(|_| store.create_session()).collect();

        let handles: Vec<_> = ids
            .iter()
            .map(|&id| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.with_session_mut(id, |s| s.interaction_count += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for id in ids {
            assert_eq!(store.snapshot(id).unwrap().interaction_count, 100);
        }
    }
}
