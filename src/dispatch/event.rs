//! Platform-neutral inbound events and outbound actions.

use crate::caption::{self, MediaKind, RewriteResult};

/// Where an inbound message was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A post in a channel where the bot is an admin.
    ChannelPost,

    /// A message sent to the bot directly (private or group chat).
    DirectMessage,
}

/// Media attached to a message, identified by its platform file id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaAttachment {
    Photo(String),
    Video(String),
    Document(String),
    None,
}

impl MediaAttachment {
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Photo(_) => MediaKind::Photo,
            Self::Video(_) => MediaKind::Video,
            Self::Document(_) => MediaKind::OtherDocument,
            Self::None => MediaKind::TextOnly,
        }
    }
}

/// Markup dialect of an outbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    MarkdownV2,
    Html,
}

/// The user who sent a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub display_name: String,
}

impl Sender {
    /// Formats an HTML link that mentions this user.
    #[must_use]
    pub fn mention_html(&self) -> String {
        format!(
            "<a href=\"tg://user?id={}\">{}</a>",
            self.id,
            escape_html(&self.display_name)
        )
    }
}

/// A message received from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: i64,
    pub message_id: i32,
    pub origin: Origin,
    pub sender: Option<Sender>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub media: MediaAttachment,
}

/// Something the platform adapter should do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    /// Replace the caption of a channel post in place.
    EditCaption {
        chat_id: i64,
        message_id: i32,
        caption: String,
        format: TextFormat,
    },

    /// Re-send the media (or a text message) as a reply to the original.
    SendCopy {
        chat_id: i64,
        reply_to: i32,
        media: MediaAttachment,
        caption: String,
        format: TextFormat,
    },
}

/// Decides how to republish a captioned message.
///
/// Returns `None` when there is no caption to rewrite.
#[must_use]
pub fn plan_action(event: &InboundEvent) -> Option<OutboundAction> {
    let RewriteResult::Rewritten(caption) =
        caption::rewrite(event.caption.as_deref(), event.media.kind())
    else {
        return None;
    };

    let action = match event.origin {
        Origin::ChannelPost => OutboundAction::EditCaption {
            chat_id: event.chat_id,
            message_id: event.message_id,
            caption,
            format: TextFormat::MarkdownV2,
        },
        Origin::DirectMessage => OutboundAction::SendCopy {
            chat_id: event.chat_id,
            reply_to: event.message_id,
            media: event.media.clone(),
            caption,
            format: TextFormat::MarkdownV2,
        },
    };

    Some(action)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
