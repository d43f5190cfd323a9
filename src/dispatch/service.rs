//! Routing of inbound events.
//!
//! Each event is handled in this order:
//! 1. A known command in a direct message → run it and reply
//! 2. A caption → rewrite it and publish the result
//! 3. Plain text in a direct message → register the chat
//!
//! Anything else, including unknown `/commands`, is ignored. Failures are
//! logged and never reach the update loop.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{ChatGateway, InboundEvent, Origin, OutboundAction, plan_action};
use crate::commands::{BotCommand, CommandContext, CommandHandler, CommandResult};
use crate::subscribers::SubscriberRegistry;

/// What the service did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A command ran; its reply was sent (or failed to send).
    Command(CommandResult),

    /// The caption was rewritten and handed to the gateway.
    Published(OutboundAction),

    /// Plain text registered the chat; `true` if it was new.
    Registered(bool),

    /// Nothing to do.
    Ignored,
}

/// Event router shared by all update handlers.
#[derive(Debug)]
pub struct BotService<G> {
    gateway: G,
    commands: CommandHandler,
    registry: Arc<SubscriberRegistry>,
    bot_username: Option<String>,
}

impl<G: ChatGateway> BotService<G> {
    #[must_use]
    pub fn new(
        gateway: G,
        commands: CommandHandler,
        registry: Arc<SubscriberRegistry>,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            gateway,
            commands,
            registry,
            bot_username,
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    /// Handles one inbound event.
    pub async fn handle(&self, event: InboundEvent) -> EventOutcome {
        if event.origin == Origin::DirectMessage
            && let Some(command) = event
                .text
                .as_deref()
                .and_then(|text| BotCommand::parse(text, self.bot_username.as_deref()))
        {
            return self.run_command(command, &event).await;
        }

        if let Some(action) = plan_action(&event) {
            if let Err(e) = self.gateway.publish(&action).await {
                warn!(
                    "Failed to publish rewritten caption for message {} in {}: {}",
                    event.message_id, event.chat_id, e
                );
            }
            return EventOutcome::Published(action);
        }

        if event.origin == Origin::DirectMessage
            && let Some(text) = event.text.as_deref()
            && !text.starts_with('/')
        {
            return EventOutcome::Registered(self.registry.add_and_persist(event.chat_id).await);
        }

        debug!(
            "Ignoring message {} in {}",
            event.message_id, event.chat_id
        );
        EventOutcome::Ignored
    }

    async fn run_command(&self, command: BotCommand, event: &InboundEvent) -> EventOutcome {
        let ctx = CommandContext {
            chat_id: event.chat_id,
            sender: event.sender.clone(),
        };

        let result = self.commands.execute(command, &ctx, &self.gateway).await;

        if let Err(e) = self
            .gateway
            .send_text(event.chat_id, &result.message, result.format)
            .await
        {
            warn!("Failed to reply to {}: {}", event.chat_id, e);
        }

        EventOutcome::Command(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{RecordingGateway, Sent};
    use crate::dispatch::{MediaAttachment, Sender, TextFormat};
    use crate::subscribers::{SubscriberFile, SubscriberStore};

    const ADMIN: i64 = 1000;

    fn service(dir: &tempfile::TempDir, gateway: RecordingGateway) -> BotService<RecordingGateway> {
        let registry = Arc::new(SubscriberRegistry::with_store(
            SubscriberStore::new(),
            SubscriberFile::new(dir.path().join("chat_ids.json")),
        ));
        let commands = CommandHandler::new(Arc::clone(&registry), [ADMIN].into_iter().collect());
        BotService::new(gateway, commands, registry, Some("CaptionBot".to_owned()))
    }

    fn direct_text(chat_id: i64, text: &str) -> InboundEvent {
        InboundEvent {
            chat_id,
            message_id: 1,
            origin: Origin::DirectMessage,
            sender: Some(Sender {
                id: 3,
                display_name: "Sam".to_owned(),
            }),
            text: Some(text.to_owned()),
            caption: None,
            media: MediaAttachment::None,
        }
    }

    fn captioned(origin: Origin, media: MediaAttachment, caption: &str) -> InboundEvent {
        InboundEvent {
            chat_id: -100_1,
            message_id: 55,
            origin,
            sender: None,
            text: None,
            caption: Some(caption.to_owned()),
            media,
        }
    }

    #[tokio::test]
    async fn test_channel_post_is_edited() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        let outcome = service
            .handle(captioned(
                Origin::ChannelPost,
                MediaAttachment::Video("vid".to_owned()),
                "Show.Name.mkv\nWatch:\nhttp://x\nhttp://y",
            ))
            .await;

        let expected = OutboundAction::EditCaption {
            chat_id: -100_1,
            message_id: 55,
            caption: "*Show Name\\.mkv*".to_owned(),
            format: TextFormat::MarkdownV2,
        };
        assert_eq!(outcome, EventOutcome::Published(expected.clone()));
        assert_eq!(service.gateway().sent(), vec![Sent::Action(expected)]);
    }

    #[tokio::test]
    async fn test_direct_photo_is_resent_as_reply() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        service
            .handle(captioned(
                Origin::DirectMessage,
                MediaAttachment::Photo("pic".to_owned()),
                "Sunset_Beach\nby @photographer",
            ))
            .await;

        assert_eq!(
            service.gateway().sent(),
            vec![Sent::Action(OutboundAction::SendCopy {
                chat_id: -100_1,
                reply_to: 55,
                media: MediaAttachment::Photo("pic".to_owned()),
                caption: "_*Sunset Beach*_".to_owned(),
                format: TextFormat::MarkdownV2,
            })]
        );
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test]
    async fn test_media_without_caption_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        let mut event = captioned(
            Origin::ChannelPost,
            MediaAttachment::Photo("pic".to_owned()),
            "",
        );
        event.caption = None;

        assert_eq!(service.handle(event).await, EventOutcome::Ignored);
        assert!(service.gateway().sent().is_empty());
    }

    #[tokio::test]
    async fn test_plain_text_registers_chat() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        assert_eq!(
            service.handle(direct_text(7, "hi")).await,
            EventOutcome::Registered(true)
        );
        assert_eq!(
            service.handle(direct_text(7, "again")).await,
            EventOutcome::Registered(false)
        );
        assert!(service.gateway().sent().is_empty());
    }

    #[tokio::test]
    async fn test_channel_text_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        let mut event = direct_text(-100_1, "announcement");
        event.origin = Origin::ChannelPost;

        assert_eq!(service.handle(event).await, EventOutcome::Ignored);
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        assert_eq!(
            service.handle(direct_text(7, "/settings")).await,
            EventOutcome::Ignored
        );
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test]
    async fn test_command_reply_is_sent() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        service.handle(direct_text(7, "/subscribe@CaptionBot")).await;

        assert_eq!(
            service.gateway().sent(),
            vec![Sent::text(
                7,
                "You have been subscribed to broadcasts.",
                TextFormat::Plain
            )]
        );
        assert!(service.registry().contains(7).await);
    }

    #[tokio::test]
    async fn test_command_for_other_bot_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::default());

        assert_eq!(
            service.handle(direct_text(7, "/subscribe@OtherBot")).await,
            EventOutcome::Ignored
        );
    }

    #[tokio::test]
    async fn test_broadcast_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::failing_for([8]));

        service.handle(direct_text(7, "hello")).await;
        service.handle(direct_text(8, "hello")).await;
        service.handle(direct_text(ADMIN, "/broadcast Big news")).await;

        let sent = service.gateway().sent();
        assert_eq!(
            sent,
            vec![
                Sent::text(7, "Big news", TextFormat::Plain),
                Sent::text(
                    ADMIN,
                    "Broadcast message sent to 1 of 2 subscribers.",
                    TextFormat::Plain
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_publish_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir, RecordingGateway::failing_for([-100_1]));

        let outcome = service
            .handle(captioned(Origin::ChannelPost, MediaAttachment::None, "x"))
            .await;

        assert!(matches!(outcome, EventOutcome::Published(_)));
        assert!(service.gateway().sent().is_empty());
    }
}
