//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use beacon_chat::ChatService;
use beacon_core::config::BeaconConfig;
use beacon_core::KnowledgeBase;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (read-only after startup).
    pub config: Arc<BeaconConfig>,
    /// Session registry; owns the shared knowledge base.
    pub chat: Arc<ChatService>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: BeaconConfig, kb: Arc<KnowledgeBase>) -> Self {
        let chat = ChatService::new(kb, config.chat.clone());
        Self {
            config: Arc::new(config),
            chat: Arc::new(chat),
            start_time: Instant::now(),
        }
    }
}
