//! SessionManager — concurrent per-session access via DashMap.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use torchtalk_core::errors::CoreResult;
use torchtalk_core::models::OrderState;
use torchtalk_core::traits::ISessionStore;

#[derive(Debug, Clone)]
struct SessionEntry {
    state: OrderState,
    touched: DateTime<Utc>,
}

/// Thread-safe in-memory session store. Whole-state replace per write; at
/// capacity the least-recently-touched session is evicted.
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionEntry>>,
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
        }
    }

    /// Create a session with a fresh id and default state.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                state: OrderState::default(),
                touched: Utc::now(),
            },
        );
        session_id
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    fn evict_oldest(&self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|r| r.value().touched)
            .map(|r| r.key().clone());
        if let Some(key) = oldest {
            self.sessions.remove(&key);
        }
    }
}

impl ISessionStore for SessionManager {
    fn get(&self, session_id: &str) -> CoreResult<OrderState> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|r| r.state.clone())
            .unwrap_or_default())
    }

    fn set(&self, session_id: &str, state: OrderState) -> CoreResult<()> {
        while !self.sessions.contains_key(session_id) && self.sessions.len() >= self.max_sessions {
            self.evict_oldest();
        }
        self.sessions.insert(
            session_id.to_string(),
            SessionEntry {
                state,
                touched: Utc::now(),
            },
        );
        Ok(())
    }

    fn remove(&self, session_id: &str) -> CoreResult<()> {
        self.sessions.remove(session_id);
        Ok(())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(torchtalk_core::constants::DEFAULT_MAX_SESSIONS)
    }
}
