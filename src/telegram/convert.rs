//! Conversion of teloxide messages into inbound events.

use teloxide::types::Message;

use crate::dispatch::{InboundEvent, MediaAttachment, Origin, Sender};

/// Builds the platform-neutral view of a message.
#[must_use]
pub fn inbound_event(msg: &Message, origin: Origin) -> InboundEvent {
    InboundEvent {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        origin,
        sender: msg.from.as_ref().map(|user| Sender {
            id: user.id.0,
            display_name: user.full_name(),
        }),
        text: msg.text().map(str::to_owned),
        caption: msg.caption().map(str::to_owned),
        media: media_attachment(msg),
    }
}

fn media_attachment(msg: &Message) -> MediaAttachment {
    if let Some(sizes) = msg.photo() {
        // Largest size comes last.
        return sizes
            .last()
            .map_or(MediaAttachment::None, |size| {
                MediaAttachment::Photo(size.file.id.0.clone())
            });
    }

    if let Some(video) = msg.video() {
        return MediaAttachment::Video(video.file.id.0.clone());
    }

    if let Some(document) = msg.document() {
        return MediaAttachment::Document(document.file.id.0.clone());
    }

    MediaAttachment::None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_channel_photo_post() {
        let msg = message(json!({
            "message_id": 12,
            "date": 1_700_000_000,
            "chat": { "id": -1_001_234_567_890_i64, "type": "channel", "title": "Releases" },
            "photo": [
                { "file_id": "small", "file_unique_id": "s", "width": 90, "height": 90 },
                { "file_id": "large", "file_unique_id": "l", "width": 1280, "height": 1280 }
            ],
            "caption": "Some.Title\nhttp://x"
        }));

        let event = inbound_event(&msg, Origin::ChannelPost);

        assert_eq!(event.chat_id, -1_001_234_567_890);
        assert_eq!(event.message_id, 12);
        assert_eq!(event.media, MediaAttachment::Photo("large".to_owned()));
        assert_eq!(event.caption.as_deref(), Some("Some.Title\nhttp://x"));
        assert_eq!(event.text, None);
        assert_eq!(event.sender, None);
    }

    #[test]
    fn test_private_text_message() {
        let msg = message(json!({
            "message_id": 3,
            "date": 1_700_000_000,
            "chat": { "id": 42, "type": "private", "first_name": "Ann" },
            "from": { "id": 42, "is_bot": false, "first_name": "Ann", "last_name": "Lee" },
            "text": "hello"
        }));

        let event = inbound_event(&msg, Origin::DirectMessage);

        assert_eq!(event.chat_id, 42);
        assert_eq!(event.text.as_deref(), Some("hello"));
        assert_eq!(event.media, MediaAttachment::None);
        assert_eq!(
            event.sender,
            Some(Sender {
                id: 42,
                display_name: "Ann Lee".to_owned(),
            })
        );
    }
}
