//! Command handler implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::types::{BotCommand, CommandContext, CommandResult};
use crate::config::AdminSet;
use crate::dispatch::{ChatGateway, broadcast};
use crate::subscribers::SubscriberRegistry;

/// Executes bot commands against the subscriber registry.
#[derive(Debug)]
pub struct CommandHandler {
    /// Shared subscriber registry.
    registry: Arc<SubscriberRegistry>,

    /// Chats allowed to broadcast.
    admins: AdminSet,
}

impl CommandHandler {
    /// Creates a new command handler.
    #[must_use]
    pub fn new(registry: Arc<SubscriberRegistry>, admins: AdminSet) -> Self {
        if admins.is_empty() {
            warn!("No admin chats configured, /broadcast is disabled");
        }
        Self { registry, admins }
    }

    /// Executes a parsed command.
    pub async fn execute<G: ChatGateway>(
        &self,
        command: BotCommand,
        ctx: &CommandContext,
        gateway: &G,
    ) -> CommandResult {
        debug!("Handling command from {}: {}", ctx.chat_id, command);

        let result = match command {
            BotCommand::Start => self.handle_start(ctx).await,
            BotCommand::Help => Self::handle_help(ctx),
            BotCommand::Subscribe => self.handle_subscribe(ctx).await,
            BotCommand::Broadcast(text) => self.handle_broadcast(ctx, &text, gateway).await,
        };

        info!(
            "Command result for {}: success={}",
            ctx.chat_id, result.success
        );
        result
    }

    async fn handle_start(&self, ctx: &CommandContext) -> CommandResult {
        self.registry.add_and_persist(ctx.chat_id).await;

        CommandResult::html(format!(
            "Hey {}! I'm here to help you keep your channel's captions clean and tidy.\n\n\
             Just add me as an admin to your channel, and I'll automatically remove any links, \
             mentions, and their preceding lines from your posts.\n\
             Check out /help to read more.",
            ctx.sender_mention_html()
        ))
    }

    fn handle_help(ctx: &CommandContext) -> CommandResult {
        let mut lines = vec![
            format!(
                "Welcome {}! Here's how I can assist you:",
                ctx.sender_mention_html()
            ),
            String::new(),
            "•   To begin, add me to your channel as an admin so I can help manage captions."
                .to_owned(),
            "•   Once added, send me any post with a link or mention, and I'll remove the link \
             or mention and the preceding line to keep your captions clean and tidy!"
                .to_owned(),
            String::new(),
        ];

        for (cmd, desc) in BotCommand::all_commands() {
            lines.push(format!("{cmd} - {desc}"));
        }

        CommandResult::html(lines.join("\n"))
    }

    async fn handle_subscribe(&self, ctx: &CommandContext) -> CommandResult {
        if self.registry.add_and_persist(ctx.chat_id).await {
            CommandResult::success("You have been subscribed to broadcasts.")
        } else {
            CommandResult::success("You are already subscribed.")
        }
    }

    async fn handle_broadcast<G: ChatGateway>(
        &self,
        ctx: &CommandContext,
        text: &str,
        gateway: &G,
    ) -> CommandResult {
        if !self.admins.contains(ctx.chat_id) {
            warn!("Unauthorized broadcast attempt from {}", ctx.chat_id);
            return CommandResult::error("You are not authorized to use this command.");
        }

        if text.is_empty() {
            return CommandResult::error("Usage: /broadcast <message>");
        }

        let recipients = self.registry.snapshot().await;
        let report = broadcast(gateway, ctx.chat_id, &recipients, text).await;

        if report.failed.is_empty() {
            CommandResult::success("Broadcast message sent to all subscribers.")
        } else {
            CommandResult::success(format!(
                "Broadcast message sent to {} of {} subscribers.",
                report.delivered,
                report.total()
            ))
        }
    }
}
