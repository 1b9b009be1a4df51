//! Order Desk - chat-based ordering assistant
//!
//! Customers browse a product catalog, build a quantity cart and check out
//! through a button-driven dialog. Administrators maintain the catalog and
//! work through the order ledger from the same chat.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
