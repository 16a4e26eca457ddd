//! Rule-based conversational engine for the Beacon chat widget.
//!
//! Classifies visitor messages into a fixed set of intents, composes replies
//! from the knowledge base, and tracks each widget's append-only transcript.

pub mod classifier;
pub mod composer;
pub mod error;
pub mod markup;
pub mod service;
pub mod session;
pub mod state;

pub use classifier::{classify, IntentRule};
pub use composer::{compose, respond, Reply, GREETING};
pub use error::ChatError;
pub use markup::Segment;
pub use service::ChatService;
pub use session::{ChatSession, SessionSnapshot};
pub use state::SessionState;
