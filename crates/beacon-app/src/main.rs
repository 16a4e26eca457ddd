//! Beacon application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialise tracing
//! 3. Load the knowledge base (built-in or TOML override) for commands that chat
//! 4. Run the selected command: API server, terminal chat, one-shot answer,
//!    or writing a default config file

mod cli;
mod terminal;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use beacon_api::AppState;
use beacon_chat::{respond, ChatSession};
use beacon_core::config::BeaconConfig;
use beacon_core::{BeaconError, KnowledgeBase};

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let command = args.command();

    // Config is loaded before tracing so the configured level applies; its
    // own log lines are emitted below once the subscriber exists.
    let config_file = args.resolve_config_path();
    let config_loaded = BeaconConfig::load(&config_file);
    let mut config = match &config_loaded {
        Ok(c) => c.clone(),
        Err(_) => BeaconConfig::default(),
    };
    config.general.port = args.resolve_port(config.general.port);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing. Logs go to stderr so they never interleave with chat output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Beacon v{}", env!("CARGO_PKG_VERSION"));
    match config_loaded {
        Ok(_) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Err(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config. Using defaults."
        ),
    }

    match command {
        Command::Init { force } => {
            write_default_config(&config_file, force)?;
            println!("Wrote default configuration to {}", config_file.display());
        }
        Command::Serve => {
            let kb = load_knowledge(&args, &config)?;
            let state = AppState::new(config, kb);
            beacon_api::start_server(state).await?;
        }
        Command::Chat => {
            let kb = load_knowledge(&args, &config)?;
            let delay = Duration::from_millis(config.chat.reply_delay_ms);
            terminal::run(ChatSession::new(kb, delay)).await?;
        }
        Command::Ask { text } => {
            let kb = load_knowledge(&args, &config)?;
            let question = text.join(" ");
            let reply = respond(&question, &kb);
            tracing::debug!(intent = %reply.intent, "Answered question");
            println!("{}", beacon_chat::markup::to_plain(&reply.text));
        }
    }

    Ok(())
}

/// Knowledge base: loaded once, shared read-only.
fn load_knowledge(args: &CliArgs, config: &BeaconConfig) -> Result<Arc<KnowledgeBase>, BeaconError> {
    let kb = match args.resolve_knowledge_path(config.knowledge.path.as_deref()) {
        Some(path) => KnowledgeBase::load(&path)?,
        None => {
            tracing::info!("Using built-in knowledge base");
            KnowledgeBase::builtin()
        }
    };
    Ok(Arc::new(kb))
}

/// Write a config file with default settings, refusing to clobber an
/// existing one unless `force` is set.
fn write_default_config(path: &Path, force: bool) -> Result<(), BeaconError> {
    if path.exists() && !force {
        return Err(BeaconError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    BeaconConfig::default().save(path)
}
