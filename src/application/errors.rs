//! Engine error types and their user-facing classification.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Broad classes of failure, each with its own user-facing treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input; re-prompt the same state.
    Validation,
    /// Stale product or order reference.
    NotFound,
    /// Transaction or connectivity failure.
    Storage,
    /// Non-admin reaching an admin flow.
    Authorization,
    /// Outbound render or notification failure.
    Delivery,
    /// Anything else: invalid transitions, panics, timeouts.
    Internal,
}

/// Failure while handling one intent.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid dialog transition: {0}")]
    Transition(ValidationError),

    #[error("Handler timed out after {0} seconds")]
    Timeout(u64),

    #[error("Handler panicked: {0}")]
    Panicked(String),
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::Domain(err) => match err.code {
                ErrorCode::ValidationFailed | ErrorCode::EmptyCart | ErrorCode::DuplicateProductName => {
                    ErrorCategory::Validation
                }
                ErrorCode::ProductNotFound | ErrorCode::OrderNotFound | ErrorCode::UserNotFound => {
                    ErrorCategory::NotFound
                }
                ErrorCode::DatabaseError => ErrorCategory::Storage,
                ErrorCode::Forbidden => ErrorCategory::Authorization,
                ErrorCode::DeliveryFailed => ErrorCategory::Delivery,
                ErrorCode::InvalidStateTransition | ErrorCode::Timeout | ErrorCode::InternalError => {
                    ErrorCategory::Internal
                }
            },
            EngineError::Transition(_) | EngineError::Timeout(_) | EngineError::Panicked(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Extracts a readable message from a caught panic payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        EngineError::Panicked(message)
    }
}
