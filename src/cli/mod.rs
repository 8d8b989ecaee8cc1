pub mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::config::AppConfig;
use crate::conversation::DEFAULT_MODEL;
use crate::logging::{self, LogTarget};
use crate::provider::DEFAULT_BASE_URL;
use crate::tui;

#[derive(Parser)]
#[command(name = "ai-model-monitor")]
#[command(version)]
#[command(about = "Monitor AI model performance and ask an ML assistant", long_about = None)]
pub struct Cli {
    /// API key for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model used for chat completions
    #[arg(long, default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Increase log verbosity (-v, -vv, ...)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the synthetic metrics table and summary
    Metrics,
    /// Ask the assistant a single question
    Ask {
        /// Question to send
        question: String,
    },
}

impl Cli {
    pub fn config(&self) -> AppConfig {
        AppConfig::new(self.api_key.clone(), self.model.clone(), self.base_url.clone())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    match &cli.command {
        Some(Commands::Metrics) => {
            logging::init(cli.verbose, LogTarget::Stderr)?;
            commands::show_metrics()?;
        }
        Some(Commands::Ask { question }) => {
            logging::init(cli.verbose, LogTarget::Stderr)?;
            commands::ask(&config, question)?;
        }
        None => {
            // Printed before the alternate screen, so it is still visible after exit
            if let Err(e) = logging::init_dashboard(cli.verbose, logging::default_log_path()) {
                eprintln!("Warning: dashboard logging disabled: {:#}", e);
            }
            tui::run_dashboard(&config)?;
        }
    }

    Ok(())
}
