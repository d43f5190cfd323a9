//! Long-polling update loop.
//!
//! Channel posts and ordinary messages are converted into inbound events
//! and handed to the shared [`BotService`]. Handlers never fail; the
//! service logs its own errors.

use std::sync::Arc;

use teloxide::RequestError;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Update;
use tracing::{debug, info};

use super::{TelegramBot, inbound_event};
use crate::dispatch::{BotService, Origin};

/// Service type injected into every update handler.
pub type SharedService = Arc<BotService<TelegramBot>>;

/// Builds the update routing tree.
#[must_use]
pub fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(Update::filter_channel_post().endpoint(on_channel_post))
        .branch(Update::filter_message().endpoint(on_message))
}

async fn on_channel_post(msg: Message, service: SharedService) -> ResponseResult<()> {
    service
        .handle(inbound_event(&msg, Origin::ChannelPost))
        .await;
    Ok(())
}

async fn on_message(msg: Message, service: SharedService) -> ResponseResult<()> {
    service
        .handle(inbound_event(&msg, Origin::DirectMessage))
        .await;
    Ok(())
}

/// Polls Telegram for updates until the dispatcher stops.
pub async fn run_dispatcher(bot: Bot, service: SharedService) {
    info!("Starting update dispatcher...");

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![service])
        .default_handler(|upd: Arc<Update>| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .build();

    dispatcher.dispatch().await;
}
