//! Conversation session: the append-only transcript behind one chat widget.
//!
//! A submission appends the user turn immediately and schedules the reply
//! on the Tokio runtime after a fixed "thinking" delay. The scheduled task
//! holds only a weak handle to the transcript, so a reply that lands after
//! the session was closed or dropped is discarded.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use beacon_core::{KnowledgeBase, Turn};
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::composer::{respond, GREETING};
use crate::error::ChatError;
use crate::state::SessionState;

struct SessionInner {
    turns: Vec<Turn>,
    state: SessionState,
    closed: bool,
    /// Last time a turn was appended.
    last_active: Instant,
}

impl SessionInner {
    fn transition(&mut self, target: SessionState, session_id: Uuid) {
        if self.state.can_transition_to(&target) {
            tracing::debug!(%session_id, "Session state: {} -> {}", self.state, target);
        } else {
            tracing::warn!(%session_id, "Unexpected session transition: {} -> {}", self.state, target);
        }
        self.state = target;
    }
}

fn lock(inner: &Mutex<SessionInner>) -> MutexGuard<'_, SessionInner> {
    // Nothing panics while holding the lock, but keep serving if it ever does.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Point-in-time view of a session for renderers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub state: SessionState,
    /// True while a reply is pending; drives the "typing" indicator.
    pub composing: bool,
    pub turns: Vec<Turn>,
}

/// One chat widget's conversation.
///
/// Must be used from within a Tokio runtime: [`ChatSession::submit`] spawns
/// the deferred reply task.
pub struct ChatSession {
    id: Uuid,
    inner: Arc<Mutex<SessionInner>>,
    kb: Arc<KnowledgeBase>,
    reply_delay: Duration,
}

impl ChatSession {
    /// Create a session seeded with the assistant greeting.
    pub fn new(kb: Arc<KnowledgeBase>, reply_delay: Duration) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session_id = %id, "Chat session created");
        Self {
            id,
            inner: Arc::new(Mutex::new(SessionInner {
                turns: vec![Turn::assistant(GREETING)],
                state: SessionState::Idle,
                closed: false,
                last_active: Instant::now(),
            })),
            kb,
            reply_delay,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submit visitor text.
    ///
    /// Blank text, a submission while a reply is pending, or a closed session
    /// leave the transcript unchanged and return the matching [`ChatError`].
    /// Otherwise the trimmed text is appended as a user turn and the returned
    /// handle resolves once the assistant turn has been appended (or
    /// discarded because the session went away).
    pub fn submit(&self, text: &str) -> Result<JoinHandle<()>, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!(session_id = %self.id, "Ignoring empty submission");
            return Err(ChatError::EmptyMessage);
        }

        {
            let mut inner = lock(&self.inner);
            if inner.closed {
                return Err(ChatError::SessionClosed);
            }
            if !inner.state.accepts_input() {
                tracing::debug!(session_id = %self.id, "Ignoring submission while reply pending");
                return Err(ChatError::ReplyPending);
            }
            inner.turns.push(Turn::user(trimmed));
            inner.last_active = Instant::now();
            inner.transition(SessionState::Pending, self.id);
        }

        let weak = Arc::downgrade(&self.inner);
        let kb = Arc::clone(&self.kb);
        let delay = self.reply_delay;
        let session_id = self.id;
        let text = trimmed.to_string();

        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(inner) = weak.upgrade() else {
                tracing::debug!(%session_id, "Session dropped before reply, discarding");
                return;
            };

            let reply = respond(&text, &kb);

            let mut guard = lock(&inner);
            if guard.closed {
                tracing::debug!(%session_id, "Session closed before reply, discarding");
                return;
            }
            guard.turns.push(Turn::assistant(reply.text));
            guard.last_active = Instant::now();
            guard.transition(SessionState::Idle, session_id);
            tracing::info!(
                %session_id,
                intent = %reply.intent,
                turns = guard.turns.len(),
                "Assistant reply appended"
            );
        }))
    }

    /// Copy of the transcript, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        lock(&self.inner).turns.clone()
    }

    pub fn turn_count(&self) -> usize {
        lock(&self.inner).turns.len()
    }

    pub fn state(&self) -> SessionState {
        lock(&self.inner).state
    }

    /// True while a reply is pending.
    pub fn is_composing(&self) -> bool {
        self.state() == SessionState::Pending
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = lock(&self.inner);
        SessionSnapshot {
            id: self.id,
            state: inner.state,
            composing: inner.state == SessionState::Pending,
            turns: inner.turns.clone(),
        }
    }

    /// Tear the session down. Any pending reply is discarded and further
    /// submissions are rejected.
    pub fn close(&self) {
        let mut inner = lock(&self.inner);
        if !inner.closed {
            inner.closed = true;
            let pending = inner.state == SessionState::Pending;
            tracing::debug!(session_id = %self.id, pending, "Chat session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.inner).closed
    }

    /// True when the session has been idle for longer than `timeout` as of
    /// `now`. A session with a reply pending never expires.
    pub fn is_expired_at(&self, now: Instant, timeout: Duration) -> bool {
        let inner = lock(&self.inner);
        inner.state != SessionState::Pending
            && now.saturating_duration_since(inner.last_active) > timeout
    }
}

// =============================================================================
// Tests
// =============================================================================
