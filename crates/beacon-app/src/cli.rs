//! CLI argument definitions for the Beacon application.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Beacon of Blessings assistant: website chat API and terminal chat.
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port", global = true)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// TOML file replacing the built-in knowledge base.
    #[arg(short = 'k', long = "knowledge", global = true)]
    pub knowledge: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the chat API (default).
    Serve,
    /// Chat with the assistant in this terminal.
    Chat,
    /// Answer a single question and exit.
    Ask {
        /// The question; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Write a configuration file with default settings.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl CliArgs {
    /// The subcommand to run, `serve` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > BEACON_CONFIG env var > ~/.beacon/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BEACON_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > BEACON_PORT env var > config file value > 3030.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("BEACON_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        3030
    }

    /// Resolve the log level: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the knowledge base file: --knowledge flag > config file value.
    ///
    /// `None` means use the built-in knowledge base.
    pub fn resolve_knowledge_path(&self, config_path: Option<&str>) -> Option<PathBuf> {
        self.knowledge
            .clone()
            .or_else(|| config_path.map(PathBuf::from))
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".beacon").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".beacon").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_command_is_serve() {
        assert_eq!(parse(&["beacon"]).command(), Command::Serve);
    }

    #[test]
    fn test_chat_subcommand() {
        assert_eq!(parse(&["beacon", "chat"]).command(), Command::Chat);
    }

    #[test]
    fn test_ask_joins_words() {
        let args = parse(&["beacon", "ask", "how", "can", "I", "donate?"]);
        match args.command() {
            Command::Ask { text } => assert_eq!(text.join(" "), "how can I donate?"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_subcommand() {
        assert_eq!(
            parse(&["beacon", "init"]).command(),
            Command::Init { force: false }
        );
        assert_eq!(
            parse(&["beacon", "init", "--force"]).command(),
            Command::Init { force: true }
        );
    }

    #[test]
    fn test_ask_requires_text() {
        assert!(CliArgs::try_parse_from(["beacon", "ask"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["beacon", "serve", "--port", "8080", "-l", "debug"]);
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_flags_take_priority() {
        let args = parse(&[
            "beacon",
            "--config",
            "/tmp/beacon.toml",
            "--port",
            "9000",
            "--knowledge",
            "/tmp/kb.toml",
        ]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/beacon.toml"));
        assert_eq!(args.resolve_port(3030), 9000);
        assert_eq!(
            args.resolve_knowledge_path(Some("/etc/kb.toml")),
            Some(PathBuf::from("/tmp/kb.toml"))
        );
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        assert_eq!(parse(&["beacon"]).resolve_log_level("warn"), "warn");
        assert_eq!(
            parse(&["beacon", "--log-level", "trace"]).resolve_log_level("warn"),
            "trace"
        );
    }

    #[test]
    fn test_knowledge_path_falls_back_to_config_then_builtin() {
        let args = parse(&["beacon"]);
        assert_eq!(
            args.resolve_knowledge_path(Some("/etc/kb.toml")),
            Some(PathBuf::from("/etc/kb.toml"))
        );
        assert_eq!(args.resolve_knowledge_path(None), None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(CliArgs::try_parse_from(["beacon", "--port", "notaport"]).is_err());
    }
}
