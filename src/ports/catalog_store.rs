//! Catalog store port.
//!
//! CRUD over products. Name uniqueness is enforced here and reported as
//! `CatalogError::DuplicateName`, distinct from storage failures.

use async_trait::async_trait;

use crate::domain::catalog::{CatalogError, ListFilter, NewProduct, Product, ProductUpdate};
use crate::domain::foundation::ProductId;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Creates an available product.
    ///
    /// # Errors
    ///
    /// - `DuplicateName` if a product with the same name exists
    /// - `Storage` on persistence failure
    async fn create(&self, product: &NewProduct) -> Result<Product, CatalogError>;

    /// Finds a product by id. Returns `None` if not found.
    async fn find(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;

    /// Lists products ordered by name.
    async fn list(&self, filter: ListFilter) -> Result<Vec<Product>, CatalogError>;

    /// Applies a partial update.
    ///
    /// Returns `false` when the update sets no field or no row matched.
    async fn update(&self, id: ProductId, update: &ProductUpdate) -> Result<bool, CatalogError>;

    /// Flips availability and returns the new flag.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product doesn't exist
    async fn toggle_availability(&self, id: ProductId) -> Result<bool, CatalogError>;

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product doesn't exist
    async fn delete(&self, id: ProductId) -> Result<(), CatalogError>;
}
