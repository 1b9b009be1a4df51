//! SQLite implementation of CatalogStore.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::domain::catalog::{CatalogError, ListFilter, NewProduct, Product, ProductUpdate};
use crate::domain::foundation::{Price, ProductId};
use crate::ports::CatalogStore;

type ProductRow = (i64, String, f64, bool);

/// SQLite implementation of CatalogStore.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn create(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        let result = sqlx::query("INSERT INTO products (name, price_per_kg, is_available) VALUES (?, ?, 1)")
            .bind(product.name())
            .bind(product.price().value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, product.name(), "insert product"))?;

        Ok(Product {
            id: ProductId::new(result.last_insert_rowid()),
            name: product.name().to_string(),
            price: product.price(),
            is_available: true,
        })
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price_per_kg, is_available FROM products WHERE id = ?")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| CatalogError::storage(format!("Failed to fetch product: {}", e)))?;

        Ok(row.map(row_to_product))
    }

    async fn list(&self, filter: ListFilter) -> Result<Vec<Product>, CatalogError> {
        let sql = match filter {
            ListFilter::AvailableOnly => {
                "SELECT id, name, price_per_kg, is_available FROM products WHERE is_available = 1 ORDER BY name"
            }
            ListFilter::All => "SELECT id, name, price_per_kg, is_available FROM products ORDER BY name",
        };
        let rows: Vec<ProductRow> = sqlx::query_as(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::storage(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }

    async fn update(&self, id: ProductId, update: &ProductUpdate) -> Result<bool, CatalogError> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE products SET ");
        let mut set = builder.separated(", ");
        if let Some(name) = &update.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(price) = update.price {
            set.push("price_per_kg = ").push_bind_unseparated(price.value());
        }
        if let Some(available) = update.is_available {
            set.push("is_available = ").push_bind_unseparated(available);
        }
        builder.push(" WHERE id = ").push_bind(id.as_i64());

        let name = update.name.as_deref().unwrap_or_default();
        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, name, "update product"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_availability(&self, id: ProductId) -> Result<bool, CatalogError> {
        let flag: Option<bool> = sqlx::query_scalar(
            "UPDATE products SET is_available = 1 - is_available WHERE id = ? RETURNING is_available",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::storage(format!("Failed to toggle availability: {}", e)))?;

        flag.ok_or(CatalogError::NotFound(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::storage(format!("Failed to delete product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_product((id, name, price, is_available): ProductRow) -> Product {
    Product {
        id: ProductId::new(id),
        name,
        price: Price::from_stored(price),
        is_available,
    }
}

fn map_write_error(e: sqlx::Error, name: &str, what: &str) -> CatalogError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return CatalogError::DuplicateName(name.to_string());
        }
    }
    CatalogError::storage(format!("Failed to {}: {}", what, e))
}
