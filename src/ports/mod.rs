//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogStore` - product CRUD
//! - `OrderLedger` - transactional order commit, history and aggregates
//! - `UserRepository` - users and their language choice
//! - `MessagingGateway` - outbound delivery of replies

mod catalog_store;
mod messaging_gateway;
mod order_ledger;
mod user_repository;

pub use catalog_store::CatalogStore;
pub use messaging_gateway::{GatewayError, MessagingGateway};
pub use order_ledger::OrderLedger;
pub use user_repository::UserRepository;
