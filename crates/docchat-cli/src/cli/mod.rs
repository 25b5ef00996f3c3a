//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docchat_core::api::ChatbotClient;
use docchat_core::config::{self, SERVER_URL_ENV};
use docchat_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "docchat")]
#[command(version)]
#[command(about = "Chat with your documents from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides config)
    #[arg(long, global = true, value_name = "URL", env = SERVER_URL_ENV)]
    server: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Upload documents for indexing
    Upload {
        /// Files to upload (pdf, docx, pptx, csv, txt, md; max 16MB each)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },

    /// Ask one question and print the answer
    Ask {
        /// The question to send
        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Answer without document retrieval
        #[arg(long = "no-rag")]
        no_rag: bool,
    },

    /// Clear the backend conversation history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show session and backend index statistics
    Stats,

    /// Print the conversation history kept by the backend
    History,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load()
        .context("load config")?
        .with_server_override(cli.server.as_deref());

    // Held until exit so buffered log lines are flushed.
    let _log_guard = match logging::init(&config::paths::logs_dir(), &config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let client = ChatbotClient::new(config.server_url.clone());

    let Some(command) = cli.command else {
        return commands::chat::run(&config);
    };

    match command {
        Commands::Upload { files } => commands::upload::run(&client, &config, &files).await,
        Commands::Ask { message, no_rag } => {
            commands::ask::run(&client, &config, &message, config.use_rag && !no_rag).await
        }
        Commands::Clear { yes } => commands::clear::run(&client, &config, yes).await,
        Commands::Stats => commands::stats::run(&client, &config).await,
        Commands::History => commands::history::run(&client).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
