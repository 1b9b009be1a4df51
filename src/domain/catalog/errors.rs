//! Catalog error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, ValidationError};

/// Errors raised by catalog operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("A product named '{0}' already exists")]
    DuplicateName(String),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Catalog storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn storage(message: impl Into<String>) -> Self {
        CatalogError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::DuplicateName(_) => ErrorCode::DuplicateProductName,
            CatalogError::NotFound(_) => ErrorCode::ProductNotFound,
            CatalogError::Validation(_) => ErrorCode::ValidationFailed,
            CatalogError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(v) => v.into(),
            CatalogError::NotFound(id) => DomainError::new(ErrorCode::ProductNotFound, err.to_string())
                .with_detail("product_id", id.to_string()),
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
