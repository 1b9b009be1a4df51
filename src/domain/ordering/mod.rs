//! Ordering module - carts, orders and ledger read models.

mod cart;
mod errors;
mod order;

pub use cart::{Cart, CartError, CartLine};
pub use errors::LedgerError;
pub use order::{NewOrder, NewOrderLine, OrderItem, OrderStatus, OrderSummary, ShoppingListEntry};
