//! Telegram client wrapper module.
//!
//! Provides the teloxide-backed [`ChatGateway`](crate::dispatch::ChatGateway)
//! implementation, message conversion, and the update dispatcher.

mod client;
mod convert;
mod updates;

pub use client::{TelegramBot, TelegramError};
pub use convert::inbound_event;
pub use updates::{SharedService, run_dispatcher, schema};
