//! Chat service: owns every live session behind one knowledge base.
//!
//! Each chat widget gets its own [`ChatSession`]; there is no state shared
//! between sessions other than the read-only knowledge base.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use beacon_core::config::ChatConfig;
use beacon_core::KnowledgeBase;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::ChatError;
use crate::session::{ChatSession, SessionSnapshot};

/// Registry of chat sessions keyed by id.
pub struct ChatService {
    kb: Arc<KnowledgeBase>,
    config: ChatConfig,
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
}

impl ChatService {
    pub fn new(kb: Arc<KnowledgeBase>, config: ChatConfig) -> Self {
        Self {
            kb,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The shared knowledge base.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, ChatSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new session seeded with the greeting.
    ///
    /// Idle sessions past `session_timeout_secs` are evicted first, so
    /// widgets that went away without closing do not hold the limit.
    pub fn create_session(&self) -> Result<SessionSnapshot, ChatError> {
        self.create_session_at(Instant::now())
    }

    fn create_session_at(&self, now: Instant) -> Result<SessionSnapshot, ChatError> {
        let mut sessions = self.sessions();
        self.evict_expired(&mut sessions, now);
        if sessions.len() >= self.config.max_sessions {
            tracing::warn!(limit = self.config.max_sessions, "Session limit reached");
            return Err(ChatError::TooManySessions(self.config.max_sessions));
        }
        let session = ChatSession::new(
            Arc::clone(&self.kb),
            Duration::from_millis(self.config.reply_delay_ms),
        );
        let snapshot = session.snapshot();
        sessions.insert(session.id(), session);
        tracing::info!(session_id = %snapshot.id, open = sessions.len(), "Chat session opened");
        Ok(snapshot)
    }

    /// Submit text to a session.
    ///
    /// Rejects messages longer than `max_message_length` characters before
    /// they reach the session; otherwise behaves like [`ChatSession::submit`].
    pub fn submit(&self, session_id: Uuid, text: &str) -> Result<JoinHandle<()>, ChatError> {
        if text.trim().chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }
        let sessions = self.sessions();
        let session = sessions
            .get(&session_id)
            .ok_or(ChatError::SessionNotFound(session_id))?;
        session.submit(text)
    }

    pub fn snapshot(&self, session_id: Uuid) -> Result<SessionSnapshot, ChatError> {
        self.sessions()
            .get(&session_id)
            .map(ChatSession::snapshot)
            .ok_or(ChatError::SessionNotFound(session_id))
    }

    /// Close and forget a session. A reply still pending for it is discarded.
    pub fn close(&self, session_id: Uuid) -> Result<(), ChatError> {
        let session = self
            .sessions()
            .remove(&session_id)
            .ok_or(ChatError::SessionNotFound(session_id))?;
        session.close();
        tracing::info!(%session_id, turns = session.turn_count(), "Chat session closed");
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }

    /// Close and drop every session expired as of `now`.
    fn evict_expired(&self, sessions: &mut HashMap<Uuid, ChatSession>, now: Instant) {
        let timeout = Duration::from_secs(self.config.session_timeout_secs);
        let before = sessions.len();
        sessions.retain(|_, session| {
            if session.is_expired_at(now, timeout) {
                session.close();
                false
            } else {
                true
            }
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, open = sessions.len(), "Expired chat sessions evicted");
        }
    }
}
