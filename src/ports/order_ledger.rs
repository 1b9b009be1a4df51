//! Order ledger port.
//!
//! Owns transactional order creation and the history and aggregate reads.
//! Implementations must commit an order header and all of its lines as one
//! unit: either everything is stored or nothing is.

use async_trait::async_trait;

use crate::domain::foundation::{OrderId, UserId};
use crate::domain::ordering::{LedgerError, NewOrder, OrderSummary, ShoppingListEntry};

#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Commits a pending order with its lines atomically.
    ///
    /// # Errors
    ///
    /// - `EmptyOrder` if the order has no lines (nothing is written)
    /// - `Storage` on failure, after rolling back
    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, LedgerError>;

    /// One user's orders, most recent first.
    async fn user_history(&self, user_id: UserId) -> Result<Vec<OrderSummary>, LedgerError>;

    /// Every order, most recent first.
    async fn all_orders(&self) -> Result<Vec<OrderSummary>, LedgerError>;

    /// Quantity per product over pending and confirmed orders, by product name.
    async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, LedgerError>;

    /// Deletes completed orders and their lines, returning how many headers
    /// were removed.
    async fn clear_completed(&self) -> Result<u64, LedgerError>;

    /// Marks an outstanding order as completed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order doesn't exist
    /// - `InvalidTransition` if it is already completed
    async fn mark_completed(&self, id: OrderId) -> Result<(), LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn OrderLedger) {}
    }
}
