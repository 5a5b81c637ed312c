use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use triage_wizard::{BASE_URL_ENV, ClientConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(
    name = "triage",
    version,
    about = "Workplace triage questionnaire and chat client"
)]
pub(crate) struct Cli {
    /// Log to stderr; filter with RUST_LOG.
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    #[command(flatten)]
    pub(crate) backend: Backend,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Six-question workplace triage.
    Survey(Survey),

    /// Three-question quick check.
    Quick(Survey),

    /// Free-form chat.
    Chat(Chat),

    /// Check that the backend is up.
    Health,
}

#[derive(Debug, Args)]
pub(crate) struct Backend {
    /// Base URL of the chat backend.
    #[arg(short, long, global = true, env = BASE_URL_ENV)]
    pub(crate) endpoint: Option<String>,

    /// Give up on requests after this many seconds. No limit by default.
    #[arg(long, global = true)]
    pub(crate) timeout_secs: Option<u64>,
}

impl Backend {
    pub(crate) fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let config = match &self.endpoint {
            Some(endpoint) => ClientConfig::new(endpoint)?,
            None => ClientConfig::from_env()?,
        };
        Ok(match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }
}

#[derive(Debug, Args)]
pub(crate) struct Survey {
    /// Full-screen terminal UI instead of line prompts.
    #[arg(long)]
    pub(crate) tui: bool,

    /// Show the reply at once instead of typing it out.
    #[arg(long)]
    pub(crate) instant: bool,

    /// Prompts without colors.
    #[arg(long, conflicts_with = "tui")]
    pub(crate) plain: bool,
}

#[derive(Debug, Args)]
pub(crate) struct Chat {
    /// Answer with the chat backend instead of the canned bot.
    #[arg(long)]
    pub(crate) backend: bool,
}
