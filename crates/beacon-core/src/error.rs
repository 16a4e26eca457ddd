use thiserror::Error;

/// Top-level error type for the Beacon system.
///
/// Startup concerns (configuration, knowledge base loading, the HTTP server)
/// surface here. Conversation-level rejections live in `beacon_chat::ChatError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BeaconError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for BeaconError {
    fn from(err: toml::de::Error) -> Self {
        BeaconError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BeaconError {
    fn from(err: toml::ser::Error) -> Self {
        BeaconError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Beacon operations.
pub type Result<T> = std::result::Result<T, BeaconError>;
