//! Telegram Bot API adapter.
//!
//! - `TelegramGateway` - outbound `sendMessage` with inline keyboards, plus
//!   long-poll `getUpdates`
//! - `wire` - Bot API payload types and translation into `Inbound` intents

mod gateway;
mod wire;

pub use gateway::{TelegramConfig, TelegramGateway};
pub use wire::{InboundUpdate, Update};
