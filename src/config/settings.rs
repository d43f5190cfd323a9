//! Application settings and Telegram configuration.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::subscribers::DEFAULT_SUBSCRIBERS_PATH;

/// Telegram Bot API configuration.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token issued by `@BotFather`.
    pub token: String,
}

impl TelegramConfig {
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self { token }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `TOKEN` to be set.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("TOKEN").map_err(|_| ConfigError::MissingEnvVar("TOKEN"))?;

        if token.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar("TOKEN"));
        }

        Ok(Self {
            token: token.trim().to_owned(),
        })
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &mask_token(&self.token))
            .finish()
    }
}

/// Chats allowed to run privileged commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSet(HashSet<i64>);

impl AdminSet {
    /// Parses a comma-separated list of chat ids.
    ///
    /// Blank entries are ignored, so an empty string is an empty set.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidAdminId(entry.to_owned()))
            })
            .collect()
    }

    #[must_use]
    pub fn contains(&self, chat_id: i64) -> bool {
        self.0.contains(&chat_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<i64> for AdminSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Bot-specific settings.
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Path to the subscriber JSON file.
    pub subscribers_path: PathBuf,

    /// Chats allowed to use `/broadcast`.
    pub admin_chat_ids: AdminSet,

    /// Log level for the application.
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            subscribers_path: PathBuf::from(DEFAULT_SUBSCRIBERS_PATH),
            admin_chat_ids: AdminSet::default(),
            log_level: default_log_level(),
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `ADMIN_CHAT_IDS` contains a non-integer entry.
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_chat_ids = match std::env::var("ADMIN_CHAT_IDS") {
            Ok(list) => AdminSet::parse(&list)?,
            Err(_) => AdminSet::default(),
        };

        Ok(Self {
            subscribers_path: std::env::var("SUBSCRIBERS_PATH")
                .map_or_else(|_| PathBuf::from(DEFAULT_SUBSCRIBERS_PATH), PathBuf::from),
            admin_chat_ids,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_level()),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid admin chat id '{0}' (must be an integer)")]
    InvalidAdminId(String),
}

/// Masks a bot token for logging (keeps the numeric bot id).
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _)) if !bot_id.is_empty() => format!("{bot_id}:***"),
        _ => "***".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BotSettings::default();
        assert_eq!(settings.subscribers_path, PathBuf::from("chat_ids.json"));
        assert!(settings.admin_chat_ids.is_empty());
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_admin_set_parse() {
        let admins = AdminSet::parse("1548840421, -100200300 ,42").unwrap();
        assert_eq!(admins.len(), 3);
        assert!(admins.contains(1_548_840_421));
        assert!(admins.contains(-100_200_300));
        assert!(!admins.contains(7));
    }

    #[test]
    fn test_admin_set_parse_blank() {
        assert!(AdminSet::parse("").unwrap().is_empty());
        assert!(AdminSet::parse(" , ,").unwrap().is_empty());
    }

    #[test]
    fn test_admin_set_parse_invalid() {
        let err = AdminSet::parse("12,abc").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAdminId(ref id) if id == "abc"));
    }

    #[test]
    fn test_token_is_masked_in_debug() {
        let config = TelegramConfig::new("123456:SECRET-PART".to_owned());
        let debug = format!("{config:?}");
        assert!(debug.contains("123456:***"));
        assert!(!debug.contains("SECRET"));
    }

    #[test]
    fn test_mask_token_without_id() {
        assert_eq!(mask_token("garbage"), "***");
        assert_eq!(mask_token(":abc"), "***");
    }
}
