//! Bot command handling module.
//!
//! Provides parsing and execution of `/start`, `/help`, `/subscribe`,
//! and the admin-only `/broadcast`.

mod handler;
mod types;

pub use handler::CommandHandler;
pub use types::{BotCommand, CommandContext, CommandResult};
