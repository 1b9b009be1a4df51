//! Order ledger error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
use super::OrderStatus;

/// Errors raised by order ledger operations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Cannot commit an order without lines")]
    EmptyOrder,

    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order ledger storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn storage(message: impl Into<String>) -> Self {
        LedgerError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::EmptyOrder => ErrorCode::EmptyCart,
            LedgerError::NotFound(_) => ErrorCode::OrderNotFound,
            LedgerError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            LedgerError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            LedgerError::NotFound(id) | LedgerError::InvalidTransition { id, .. } => {
                domain.with_detail("order_id", id.to_string())
            }
            _ => domain,
        }
    }
}
