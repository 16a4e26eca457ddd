//! End-to-end conversation scenarios against the built-in knowledge base.
//!
//! Each test drives a fresh session through the public API exactly as a
//! chat widget would: submit text, wait for the reply, read the transcript.

use std::sync::Arc;
use std::time::Duration;

use beacon_chat::{classify, compose, ChatError, ChatSession, GREETING};
use beacon_core::{Intent, KnowledgeBase, Role};

// =============================================================================
// Helpers
// =============================================================================

fn kb() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::builtin())
}

fn new_session() -> ChatSession {
    ChatSession::new(kb(), Duration::from_millis(20))
}

/// Submit `text` and wait for the assistant turn.
async fn ask(session: &ChatSession, text: &str) -> String {
    session.submit(text).unwrap().await.unwrap();
    let last = session.turns().pop().unwrap();
    assert_eq!(last.role, Role::Assistant);
    last.text
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_fresh_session_has_only_greeting() {
    let session = new_session();
    let turns = session.turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::Assistant);
    assert_eq!(turns[0].text, GREETING);
}

#[tokio::test]
async fn test_donation_question() {
    let session = new_session();
    let reply = ask(&session, "How can I donate?").await;

    let turns = session.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].text, GREETING);
    assert_eq!(turns[1].role, Role::User);
    assert_eq!(turns[1].text, "How can I donate?");
    assert!(reply.contains("Donate"));
}

#[tokio::test]
async fn test_founder_question() {
    let session = new_session();
    let reply = ask(&session, "Tell me about the founder").await;
    assert!(reply.contains("Lionel Tchami"));
    assert!(reply.contains("Founder & Director"));
}

#[tokio::test]
async fn test_goodbye_is_history_independent() {
    let kb = KnowledgeBase::builtin();
    let expected = compose(Intent::Goodbye, &kb);

    let fresh = new_session();
    assert_eq!(ask(&fresh, "bye").await, expected);

    let chatty = new_session();
    ask(&chatty, "hello").await;
    ask(&chatty, "what programs do you run?").await;
    ask(&chatty, "thanks").await;
    assert_eq!(ask(&chatty, "bye").await, expected);
}

#[tokio::test]
async fn test_rapid_double_submit_is_single_flight() {
    let session = new_session();
    let handle = session.submit("hello").unwrap();
    let second = session.submit("hello");
    assert!(matches!(second, Err(ChatError::ReplyPending)));
    assert!(second.unwrap_err().is_ignorable());

    handle.await.unwrap();

    let turns = session.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(
        turns.iter().filter(|t| t.role == Role::User).count(),
        1
    );

    // Give a stray second reply time to land, if one had been scheduled.
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(session.turn_count(), 3);
}

#[tokio::test]
async fn test_whitespace_submission_is_no_op() {
    let session = new_session();
    assert!(matches!(session.submit("   "), Err(ChatError::EmptyMessage)));
    assert_eq!(session.turn_count(), 1);
    assert!(!session.is_composing());
}

#[tokio::test]
async fn test_submission_accepted_again_after_reply() {
    let session = new_session();
    ask(&session, "hello").await;
    let reply = ask(&session, "I want to volunteer and donate").await;
    assert_eq!(reply, compose(Intent::Donation, &KnowledgeBase::builtin()));
    assert_eq!(session.turn_count(), 5);
}

#[tokio::test]
async fn test_unmatched_input_gets_menu() {
    let session = new_session();
    let reply = ask(&session, "asdkjasdkj").await;
    assert_eq!(classify("asdkjasdkj"), Intent::Unmatched);
    assert!(reply.contains("programs"));
    assert!(reply.contains("donate"));
    assert!(reply.contains("volunteer"));
}

#[tokio::test]
async fn test_close_during_pending_reply() {
    let session = new_session();
    let handle = session.submit("what is your mission").unwrap();
    assert!(session.is_composing());
    session.close();
    handle.await.unwrap();
    assert_eq!(session.turn_count(), 2);
    assert!(matches!(session.submit("hello"), Err(ChatError::SessionClosed)));
}

#[tokio::test]
async fn test_custom_knowledge_flows_into_replies() {
    let mut custom = KnowledgeBase::builtin();
    custom.leadership.founder.name = "Ada Obi".to_string();
    let session = ChatSession::new(Arc::new(custom), Duration::from_millis(1));
    let reply = ask(&session, "who is the founder").await;
    assert!(reply.contains("Ada Obi"));
    assert!(!reply.contains("Lionel Tchami"));
}
