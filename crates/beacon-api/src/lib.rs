//! Beacon API crate - axum HTTP surface for the chat widget.
//!
//! Exposes the knowledge base, stateless classification, and per-widget
//! chat sessions to a browser front end.

pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
