//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sqlite` - catalog, order ledger and user storage
//! - `locales` - phrase catalogs loaded from JSON files
//! - `telegram` - Bot API long polling and message delivery

pub mod locales;
pub mod sqlite;
pub mod telegram;
