use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{BeaconError, Result};

/// Top-level configuration for the Beacon application.
///
/// Loaded from `~/.beacon/config.toml` by default. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeaconConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl BeaconConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BeaconConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values that would make the chat surface unusable.
    pub fn validate(&self) -> Result<()> {
        if self.chat.max_message_length == 0 {
            return Err(BeaconError::Config(
                "chat.max_message_length must be greater than 0".to_string(),
            ));
        }
        if self.chat.max_sessions == 0 {
            return Err(BeaconError::Config(
                "chat.max_sessions must be greater than 0".to_string(),
            ));
        }
        if self.chat.session_timeout_secs == 0 {
            return Err(BeaconError::Config(
                "chat.session_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// HTTP API port (bound on 127.0.0.1).
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 3030,
        }
    }
}

/// Chat widget behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated "thinking" delay before the assistant reply is appended.
    pub reply_delay_ms: u64,
    /// Longest message accepted from the HTTP surface, in characters.
    pub max_message_length: usize,
    /// Upper bound on concurrently open sessions.
    pub max_sessions: usize,
    /// Idle sessions older than this are evicted to make room for new ones.
    pub session_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 600,
            max_message_length: 2000,
            max_sessions: 1000,
            session_timeout_secs: 1800,
        }
    }
}

/// Where the knowledge base comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Optional TOML file replacing the built-in knowledge base.
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = BeaconConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.port, 3030);
        assert_eq!(config.chat.reply_delay_ms, 600);
        assert_eq!(config.chat.max_message_length, 2000);
        assert_eq!(config.chat.max_sessions, 1000);
        assert_eq!(config.chat.session_timeout_secs, 1800);
        assert!(config.knowledge.path.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
port = 8080

[chat]
reply_delay_ms = 250
max_message_length = 500
max_sessions = 10
session_timeout_secs = 60

[knowledge]
path = "/etc/beacon/knowledge.toml"
"#;
        let file = create_temp_config(content);
        let config = BeaconConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.port, 8080);
        assert_eq!(config.chat.reply_delay_ms, 250);
        assert_eq!(config.chat.max_message_length, 500);
        assert_eq!(config.chat.max_sessions, 10);
        assert_eq!(config.chat.session_timeout_secs, 60);
        assert_eq!(
            config.knowledge.path.as_deref(),
            Some("/etc/beacon/knowledge.toml")
        );
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
reply_delay_ms = 0
"#;
        let file = create_temp_config(content);
        let config = BeaconConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 0);
        // Remaining fields use defaults
        assert_eq!(config.chat.max_message_length, 2000);
        assert_eq!(config.general.port, 3030);
    }

    #[test]
    fn test_load_rejects_zero_message_length() {
        let file = create_temp_config("[chat]\nmax_message_length = 0\n");
        let err = BeaconConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, BeaconError::Config(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[general\nport = ");
        assert!(BeaconConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_zero_session_timeout() {
        let file = create_temp_config("[chat]\nsession_timeout_secs = 0\n");
        let err = BeaconConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("session_timeout_secs"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = BeaconConfig::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, BeaconError::Io(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = BeaconConfig::default();
        config.general.port = 4040;
        config.chat.reply_delay_ms = 100;
        config.save(&path).unwrap();

        let loaded = BeaconConfig::load(&path).unwrap();
        assert_eq!(loaded.general.port, 4040);
        assert_eq!(loaded.chat.reply_delay_ms, 100);
    }
}
