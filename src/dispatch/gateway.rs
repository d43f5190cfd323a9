//! Outbound seam between the dispatch layer and the chat platform.

use std::future::Future;

use super::{OutboundAction, TextFormat};
use crate::telegram::TelegramError;

/// Everything the dispatch layer needs to send to the platform.
pub trait ChatGateway: Send + Sync {
    /// Sends a standalone text message to a chat.
    fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> impl Future<Output = Result<(), TelegramError>> + Send;

    /// Carries out a caption edit or a re-send.
    fn publish(
        &self,
        action: &OutboundAction,
    ) -> impl Future<Output = Result<(), TelegramError>> + Send;
}
