//! Configuration module for the caption bot.
//!
//! Handles loading the bot token, the admin chat list, and the
//! subscriber file location from the environment.

mod settings;

pub use settings::{AdminSet, BotSettings, ConfigError, TelegramConfig};
