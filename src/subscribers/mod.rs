//! Subscriber registry module.
//!
//! Tracks which chats have interacted with the bot and keeps that set
//! on disk as a bare JSON array of chat ids.

mod registry;
mod store;

pub use registry::SubscriberRegistry;
pub use store::{StoreError, SubscriberFile, SubscriberStore};

/// Default location of the subscriber file.
pub const DEFAULT_SUBSCRIBERS_PATH: &str = "chat_ids.json";
