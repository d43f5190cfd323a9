//! Caption Cleaner Bot - Main Entry Point
//!
//! A Telegram bot that rewrites media captions in channels where it is an
//! admin and in chats that send it captioned media.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use caption_cleaner_bot::commands::CommandHandler;
use caption_cleaner_bot::config::{BotSettings, TelegramConfig};
use caption_cleaner_bot::dispatch::BotService;
use caption_cleaner_bot::subscribers::{SubscriberFile, SubscriberRegistry};
use caption_cleaner_bot::telegram::{TelegramBot, run_dispatcher};

/// Telegram bot that cleans up media captions.
#[derive(Parser, Debug)]
#[command(name = "caption_bot")]
#[command(about = "Strip links and mentions from Telegram media captions")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to the subscriber JSON file (overrides `SUBSCRIBERS_PATH`).
    #[arg(short, long)]
    subscribers: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Load configurations
    let tg_config = TelegramConfig::from_env()
        .context("Failed to load Telegram configuration from environment")?;

    let mut settings = BotSettings::from_env().context("Failed to load bot settings")?;
    if let Some(path) = args.subscribers {
        settings.subscribers_path = path;
    }

    info!(
        "Subscriber file: {} ({} admin chats)",
        settings.subscribers_path.display(),
        settings.admin_chat_ids.len()
    );

    let registry = Arc::new(
        SubscriberRegistry::open(SubscriberFile::new(&settings.subscribers_path))
            .context("Failed to load subscribers")?,
    );

    // Connect to Telegram
    let bot = TelegramBot::connect(&tg_config)
        .await
        .context("Failed to connect to Telegram")?;

    let commands = CommandHandler::new(Arc::clone(&registry), settings.admin_chat_ids);
    let username = bot.username().map(str::to_owned);
    let telegram = bot.inner().clone();
    let service = Arc::new(BotService::new(
        bot,
        commands,
        Arc::clone(&registry),
        username,
    ));

    info!("Bot is running. Use Ctrl+C to stop.");

    tokio::select! {
        () = run_dispatcher(telegram, Arc::clone(&service)) => {
            info!("Update dispatcher exited");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    // Cleanup
    info!("Shutting down...");
    if let Err(e) = registry.flush().await {
        warn!("Failed to save subscribers on shutdown: {}", e);
    }

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
