//! daybook CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config and data directory
//! - `chat`    — Interactive chat or single-message mode
//! - `today`   — Print today's day log
//! - `history` — Print day logs for a date range

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "daybook",
    about = "daybook — conversational day-log assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and data directory
    Onboard,

    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print today's day log
    Today,

    /// Print day logs for a date range (YYYYMMDD keys)
    History {
        /// First day to include
        start: String,

        /// Last day to include; omit for everything from start onward
        end: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Today => commands::today::run().await?,
        Commands::History { start, end } => commands::history::run(start, end).await?,
    }

    Ok(())
}
