//! SQLite adapters for the storage ports.

mod catalog_store;
mod order_ledger;
mod pool;
mod user_repository;

pub use catalog_store::SqliteCatalogStore;
pub use order_ledger::SqliteOrderLedger;
pub use pool::{connect, connect_in_memory, create_schema};
pub use user_repository::SqliteUserRepository;
