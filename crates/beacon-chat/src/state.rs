//! Session state machine.
//!
//! A session alternates between two states:
//! - Idle -> Pending (user turn accepted, reply scheduled)
//! - Pending -> Idle (assistant turn appended)

use std::fmt;

use serde::Serialize;

/// Whether a session is accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for the next submission.
    Idle,
    /// One reply is being composed; new submissions are rejected.
    Pending,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Pending => write!(f, "Pending"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Pending) | (SessionState::Pending, SessionState::Idle)
        )
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Pending.to_string(), "Pending");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::Idle.can_transition_to(&SessionState::Pending));
        assert!(SessionState::Pending.can_transition_to(&SessionState::Idle));
    }

    #[test]
    fn test_self_transitions_are_invalid() {
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Idle));
        assert!(!SessionState::Pending.can_transition_to(&SessionState::Pending));
    }

    #[test]
    fn test_accepts_input() {
        assert!(SessionState::Idle.accepts_input());
        assert!(!SessionState::Pending.accepts_input());
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SessionState::Pending).unwrap(),
            "\"pending\""
        );
    }
}
