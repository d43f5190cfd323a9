//! In-memory gateway for dispatch tests.

use std::collections::HashSet;
use std::sync::Mutex;

use super::{ChatGateway, OutboundAction, TextFormat};
use crate::telegram::TelegramError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        format: TextFormat,
    },
    Action(OutboundAction),
}

impl Sent {
    pub fn text(chat_id: i64, text: &str, format: TextFormat) -> Self {
        Self::Text {
            chat_id,
            text: text.to_owned(),
            format,
        }
    }
}

/// Records everything sent; chats in `failing` reject every request.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Sent>>,
    failing: HashSet<i64>,
}

impl RecordingGateway {
    pub fn failing_for(chats: impl IntoIterator<Item = i64>) -> Self {
        Self {
            sent: Mutex::default(),
            failing: chats.into_iter().collect(),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, chat_id: i64, sent: Sent) -> Result<(), TelegramError> {
        if self.failing.contains(&chat_id) {
            return Err(TelegramError::Api("Forbidden: bot was blocked by the user".to_owned()));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

impl ChatGateway for RecordingGateway {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TelegramError> {
        self.record(chat_id, Sent::text(chat_id, text, format))
    }

    async fn publish(&self, action: &OutboundAction) -> Result<(), TelegramError> {
        let chat_id = match action {
            OutboundAction::EditCaption { chat_id, .. } | OutboundAction::SendCopy { chat_id, .. } => {
                *chat_id
            }
        };
        self.record(chat_id, Sent::Action(action.clone()))
    }
}
