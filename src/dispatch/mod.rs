//! Event dispatch module.
//!
//! Sits between the platform adapter and the core: classifies inbound
//! events, rewrites captions, runs commands, and registers subscribers.
//! It reaches the platform only through [`ChatGateway`].

mod broadcasting;
mod event;
mod gateway;
mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use broadcasting::{BroadcastReport, broadcast};
pub use event::{
    InboundEvent, MediaAttachment, Origin, OutboundAction, Sender, TextFormat, plan_action,
};
pub use gateway::ChatGateway;
pub use service::{BotService, EventOutcome};
