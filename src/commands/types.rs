//! Command types and definitions.

use std::fmt;

use crate::dispatch::{Sender, TextFormat};

/// Available bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Greet the user and register the chat.
    Start,

    /// Show help information.
    Help,

    /// Register the chat for broadcasts.
    Subscribe,

    /// Send a message to every subscriber (admins only).
    Broadcast(String),
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Accepts an optional `@username` suffix on the command name; when the
    /// bot's own username is known, a suffix naming another bot is rejected.
    /// Returns `None` if the message is not a known command.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let text = text.trim();
        let after_slash = text.strip_prefix('/')?;

        let (head, args) = match after_slash.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (after_slash, ""),
        };

        let name = match head.split_once('@') {
            Some((name, target)) => {
                if let Some(me) = bot_username
                    && !target.eq_ignore_ascii_case(me)
                {
                    return None;
                }
                name
            }
            None => head,
        };

        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "subscribe" => Some(Self::Subscribe),
            "broadcast" => Some(Self::Broadcast(
                args.split_whitespace().collect::<Vec<_>>().join(" "),
            )),
            _ => None,
        }
    }

    /// Returns the command name as it appears in help.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Subscribe => "subscribe",
            Self::Broadcast(_) => "broadcast",
        }
    }

    /// Returns the commands listed in `/help`.
    #[must_use]
    pub fn all_commands() -> Vec<(&'static str, &'static str)> {
        vec![
            ("/start", "Start the bot and receive a friendly greeting."),
            ("/help", "Get detailed instructions on how to use the bot."),
            ("/subscribe", "Subscribe to receive broadcast messages."),
        ]
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast(text) => write!(f, "broadcast ({} chars)", text.chars().count()),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Who issued a command and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub chat_id: i64,
    pub sender: Option<Sender>,
}

impl CommandContext {
    /// HTML mention of the sender, or a neutral fallback.
    #[must_use]
    pub fn sender_mention_html(&self) -> String {
        self.sender
            .as_ref()
            .map_or_else(|| "there".to_owned(), Sender::mention_html)
    }
}

/// Result of command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command was successful.
    pub success: bool,

    /// Reply to send back to the chat.
    pub message: String,

    /// Markup of `message`.
    pub format: TextFormat,
}

impl CommandResult {
    /// Creates a successful plain-text result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            format: TextFormat::Plain,
        }
    }

    /// Creates a successful HTML result.
    #[must_use]
    pub fn html(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            format: TextFormat::Html,
        }
    }

    /// Creates an error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            format: TextFormat::Plain,
        }
    }
}
