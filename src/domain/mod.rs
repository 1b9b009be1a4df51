//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Products and catalog edits
//! - `ordering` - Cart aggregate, orders and ledger read models
//! - `user` - Chat users and their profiles
//! - `conversation` - Dialog state machine, intents and replies
//! - `i18n` - Phrase catalogs and tiered-fallback resolution

pub mod catalog;
pub mod conversation;
pub mod foundation;
pub mod i18n;
pub mod ordering;
pub mod user;
