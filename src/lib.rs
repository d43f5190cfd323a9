//! Caption Cleaner Bot Library
//!
//! A Telegram bot that tidies up media captions.
//!
//! This crate provides the core functionality for:
//! - Rewriting captions (dropping links, mentions, and link labels)
//! - Republishing them by editing channel posts or replying in chats
//! - Keeping a persistent registry of subscribed chats
//! - Broadcasting admin messages to every subscriber

pub mod caption;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod subscribers;
pub mod telegram;
