//! Telegram Bot API client wrapper.

use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, MessageId, ParseMode, ReplyParameters};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::dispatch::{ChatGateway, MediaAttachment, OutboundAction, TextFormat};

/// Errors that can occur during Telegram operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Flood wait required: {0} seconds")]
    FloodWait(u32),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API invocation error: {0}")]
    Invocation(String),
}

impl From<RequestError> for TelegramError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::RetryAfter(seconds) => Self::FloodWait(seconds.seconds()),
            RequestError::Api(e) => Self::Api(e.to_string()),
            RequestError::Network(e) => Self::Network(e.to_string()),
            other => Self::Invocation(other.to_string()),
        }
    }
}

/// High-level Telegram bot wrapper.
#[derive(Clone)]
pub struct TelegramBot {
    /// The underlying teloxide bot.
    bot: Bot,

    /// The bot's own username, used to match `/command@username`.
    username: Option<String>,
}

impl TelegramBot {
    /// Creates the bot and verifies the token with `getMe`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or Telegram is unreachable.
    pub async fn connect(config: &TelegramConfig) -> Result<Self, TelegramError> {
        info!("Connecting to Telegram...");

        let bot = Bot::new(config.token.clone());
        let me = bot
            .get_me()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))?;

        let username = me.user.username.clone();
        info!(
            "Connected to Telegram as @{}",
            username.as_deref().unwrap_or("unknown")
        );

        Ok(Self { bot, username })
    }

    /// Returns the bot's username, if it has one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns a reference to the underlying bot for the update dispatcher.
    #[must_use]
    pub fn inner(&self) -> &Bot {
        &self.bot
    }

    async fn send_copy(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        media: &MediaAttachment,
        caption: &str,
        format: TextFormat,
    ) -> Result<(), TelegramError> {
        let reply = ReplyParameters::new(reply_to);

        match media {
            MediaAttachment::Photo(file_id) => {
                let mut req = self
                    .bot
                    .send_photo(chat_id, InputFile::file_id(FileId(file_id.clone())))
                    .caption(caption)
                    .reply_parameters(reply);
                req.parse_mode = parse_mode(format);
                req.await?;
            }
            MediaAttachment::Video(file_id) => {
                let mut req = self
                    .bot
                    .send_video(chat_id, InputFile::file_id(FileId(file_id.clone())))
                    .caption(caption)
                    .reply_parameters(reply);
                req.parse_mode = parse_mode(format);
                req.await?;
            }
            MediaAttachment::Document(file_id) => {
                let mut req = self
                    .bot
                    .send_document(chat_id, InputFile::file_id(FileId(file_id.clone())))
                    .caption(caption)
                    .reply_parameters(reply);
                req.parse_mode = parse_mode(format);
                req.await?;
            }
            MediaAttachment::None => {
                let mut req = self
                    .bot
                    .send_message(chat_id, caption)
                    .reply_parameters(reply);
                req.parse_mode = parse_mode(format);
                req.await?;
            }
        }

        Ok(())
    }
}

impl ChatGateway for TelegramBot {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TelegramError> {
        let mut req = self.bot.send_message(ChatId(chat_id), text);
        req.parse_mode = parse_mode(format);
        req.await?;
        Ok(())
    }

    async fn publish(&self, action: &OutboundAction) -> Result<(), TelegramError> {
        match action {
            OutboundAction::EditCaption {
                chat_id,
                message_id,
                caption,
                format,
            } => {
                debug!("Editing caption of message {} in {}", message_id, chat_id);
                let mut req = self
                    .bot
                    .edit_message_caption(ChatId(*chat_id), MessageId(*message_id))
                    .caption(caption);
                req.parse_mode = parse_mode(*format);
                req.await?;
            }
            OutboundAction::SendCopy {
                chat_id,
                reply_to,
                media,
                caption,
                format,
            } => {
                debug!("Replying to message {} in {}", reply_to, chat_id);
                self.send_copy(ChatId(*chat_id), MessageId(*reply_to), media, caption, *format)
                    .await?;
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Maps an outbound text format onto a Bot API parse mode.
const fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::MarkdownV2 => Some(ParseMode::MarkdownV2),
        TextFormat::Html => Some(ParseMode::Html),
    }
}
