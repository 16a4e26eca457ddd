//! Error types for the conversational engine.
//!
//! `EmptyMessage` and `ReplyPending` are rejections, not failures: the
//! session is left untouched and callers are free to ignore them.

/// Reasons a chat operation was not applied.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a reply is already being composed")]
    ReplyPending,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("session is closed")]
    SessionClosed,
    #[error("session limit of {0} reached")]
    TooManySessions(usize),
}

impl ChatError {
    /// True for the silent no-op rejections a widget should simply ignore.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, ChatError::EmptyMessage | ChatError::ReplyPending)
    }

    /// Short machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::EmptyMessage => "empty_input",
            ChatError::ReplyPending => "reply_pending",
            ChatError::MessageTooLong(_) => "message_too_long",
            ChatError::SessionNotFound(_) => "session_not_found",
            ChatError::SessionClosed => "session_closed",
            ChatError::TooManySessions(_) => "too_many_sessions",
        }
    }
}
