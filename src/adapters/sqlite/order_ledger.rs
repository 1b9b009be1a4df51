//! SQLite implementation of OrderLedger.
//!
//! Order lines join products with a LEFT JOIN so history survives product
//! deletion; a deleted product is shown as `#<product_id>`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::foundation::{
    OrderId, Price, ProductId, Quantity, StateMachine, Timestamp, UserId,
};
use crate::domain::ordering::{
    LedgerError, NewOrder, OrderItem, OrderStatus, OrderSummary, ShoppingListEntry,
};
use crate::ports::OrderLedger;

/// Order header joined with one (optional) item.
#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: i64,
    user_id: i64,
    user_name: String,
    created_at: i64,
    total_price: f64,
    status: String,
    product_id: Option<i64>,
    product_name: Option<String>,
    quantity_kg: Option<f64>,
    price_at_order: Option<f64>,
}

const HISTORY_SQL: &str = r#"
    SELECT o.id, o.user_id, o.user_name, o.created_at, o.total_price, o.status,
           oi.product_id,
           COALESCE(p.name, '#' || oi.product_id) AS product_name,
           oi.quantity_kg, oi.price_at_order
    FROM orders o
    LEFT JOIN order_items oi ON oi.order_id = o.id
    LEFT JOIN products p ON p.id = oi.product_id
    WHERE (?1 IS NULL OR o.user_id = ?1)
    ORDER BY o.created_at DESC, o.id DESC, oi.id ASC
"#;

/// SQLite implementation of OrderLedger.
#[derive(Clone)]
pub struct SqliteOrderLedger {
    pool: SqlitePool,
}

impl SqliteOrderLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn history(&self, user_id: Option<UserId>) -> Result<Vec<OrderSummary>, LedgerError> {
        let rows: Vec<HistoryRow> = sqlx::query_as(HISTORY_SQL)
            .bind(user_id.map(|u| u.as_i64()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to fetch order history: {}", e)))?;

        group_rows(rows)
    }
}

#[async_trait]
impl OrderLedger for SqliteOrderLedger {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, LedgerError> {
        if order.lines.is_empty() {
            return Err(LedgerError::EmptyOrder);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to start transaction: {}", e)))?;

        let header = sqlx::query(
            r#"
            INSERT INTO orders (user_id, user_name, created_at, total_price, status)
            VALUES (?, ?, ?, ?, 'pending')
            "#,
        )
        .bind(order.user_id.as_i64())
        .bind(&order.user_name)
        .bind(Timestamp::now().as_millis())
        .bind(order.total)
        .execute(&mut *tx)
        .await
        .map_err(|e| LedgerError::storage(format!("Failed to insert order: {}", e)))?;

        let order_id = header.last_insert_rowid();

        for line in &order.lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity_kg, price_at_order)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(line.product_id.as_i64())
            .bind(line.quantity.value())
            .bind(line.unit_price.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to insert order line: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to commit order: {}", e)))?;

        Ok(OrderId::new(order_id))
    }

    async fn user_history(&self, user_id: UserId) -> Result<Vec<OrderSummary>, LedgerError> {
        self.history(Some(user_id)).await
    }

    async fn all_orders(&self) -> Result<Vec<OrderSummary>, LedgerError> {
        self.history(None).await
    }

    async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, LedgerError> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(p.name, '#' || oi.product_id) AS product_name,
                   SUM(oi.quantity_kg) AS total_quantity
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            LEFT JOIN products p ON p.id = oi.product_id
            WHERE o.status IN ('pending', 'confirmed')
            GROUP BY oi.product_id
            ORDER BY product_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::storage(format!("Failed to aggregate shopping list: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(product_name, total_quantity)| ShoppingListEntry {
                product_name,
                total_quantity,
            })
            .collect())
    }

    async fn clear_completed(&self) -> Result<u64, LedgerError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            "DELETE FROM order_items WHERE order_id IN (SELECT id FROM orders WHERE status = 'completed')",
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| LedgerError::storage(format!("Failed to delete completed order lines: {}", e)))?;

        let removed = sqlx::query("DELETE FROM orders WHERE status = 'completed'")
            .execute(&mut *tx)
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to delete completed orders: {}", e)))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to commit clear: {}", e)))?;

        Ok(removed)
    }

    async fn mark_completed(&self, id: OrderId) -> Result<(), LedgerError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to start transaction: {}", e)))?;

        let stored: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to fetch order: {}", e)))?;

        let current: OrderStatus = stored
            .ok_or(LedgerError::NotFound(id))?
            .parse()
            .map_err(|e| LedgerError::storage(format!("Corrupt order status: {}", e)))?;

        let next = current
            .transition_to(OrderStatus::Completed)
            .map_err(|_| LedgerError::InvalidTransition {
                id,
                from: current,
                to: OrderStatus::Completed,
            })?;

        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(next.as_str())
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to update order status: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| LedgerError::storage(format!("Failed to commit status change: {}", e)))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Folds header/item rows (ordered by order) into summaries.
fn group_rows(rows: Vec<HistoryRow>) -> Result<Vec<OrderSummary>, LedgerError> {
    let mut summaries: Vec<OrderSummary> = Vec::new();

    for row in rows {
        let is_new = summaries.last().map_or(true, |s| s.id.as_i64() != row.id);
        if is_new {
            summaries.push(OrderSummary {
                id: OrderId::new(row.id),
                user_id: UserId::new(row.user_id),
                user_name: row.user_name,
                created_at: Timestamp::from_millis(row.created_at).ok_or_else(|| {
                    LedgerError::storage(format!("Invalid created_at for order {}", row.id))
                })?,
                total: row.total_price,
                status: row
                    .status
                    .parse()
                    .map_err(|e| LedgerError::storage(format!("Corrupt order status: {}", e)))?,
                items: Vec::new(),
            });
        }

        if let (Some(product_id), Some(quantity), Some(price)) =
            (row.product_id, row.quantity_kg, row.price_at_order)
        {
            if let Some(summary) = summaries.last_mut() {
                summary.items.push(OrderItem {
                    product_id: ProductId::new(product_id),
                    product_name: row
                        .product_name
                        .unwrap_or_else(|| format!("#{}", product_id)),
                    quantity: Quantity::from_stored(quantity),
                    unit_price: Price::from_stored(price),
                });
            }
        }
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{connect_in_memory, create_schema, SqliteCatalogStore};
    use crate::domain::catalog::NewProduct;
    use crate::domain::ordering::NewOrderLine;
    use crate::ports::CatalogStore;

    struct Fixture {
        ledger: SqliteOrderLedger,
        catalog: SqliteCatalogStore,
        pool: SqlitePool,
    }

    async fn fixture() -> Fixture {
        let pool = connect_in_memory().await.unwrap();
        create_schema(&pool).await.unwrap();
        Fixture {
            ledger: SqliteOrderLedger::new(pool.clone()),
            catalog: SqliteCatalogStore::new(pool.clone()),
            pool,
        }
    }

    async fn product(f: &Fixture, name: &str) -> ProductId {
        let new = NewProduct::new(name, Price::try_new(2.0).unwrap()).unwrap();
        f.catalog.create(&new).await.unwrap().id
    }

    fn line(product_id: ProductId, qty: f64, price: f64) -> NewOrderLine {
        NewOrderLine {
            product_id,
            product_name: String::new(),
            quantity: Quantity::try_new(qty).unwrap(),
            unit_price: Price::try_new(price).unwrap(),
        }
    }

    fn order(user: i64, lines: Vec<NewOrderLine>) -> NewOrder {
        let total = lines.iter().map(NewOrderLine::subtotal).sum();
        NewOrder {
            user_id: UserId::new(user),
            user_name: format!("user{}", user),
            lines,
            total,
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    mod create_order {
        use super::*;

        #[tokio::test]
        async fn stores_header_and_one_line_per_item() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            let pears = product(&f, "Pears").await;

            let id = f
                .ledger
                .create_order(&order(1, vec![line(apples, 1.5, 2.0), line(pears, 2.0, 1.0)]))
                .await
                .unwrap();

            let history = f.ledger.user_history(UserId::new(1)).await.unwrap();
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].id, id);
            assert_eq!(history[0].status, OrderStatus::Pending);
            assert_eq!(history[0].total, 5.0);
            assert_eq!(history[0].items.len(), 2);
            assert_eq!(count(&f.pool, "order_items").await, 2);
        }

        #[tokio::test]
        async fn empty_order_writes_nothing() {
            let f = fixture().await;
            let err = f.ledger.create_order(&order(1, vec![])).await.unwrap_err();
            assert!(matches!(err, LedgerError::EmptyOrder));
            assert_eq!(count(&f.pool, "orders").await, 0);
        }

        #[tokio::test]
        async fn failing_line_rolls_back_header() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            let mut bad = line(apples, 1.0, 2.0);
            bad.quantity = Quantity::from_stored(-1.0);

            let result = f
                .ledger
                .create_order(&order(1, vec![line(apples, 1.0, 2.0), bad]))
                .await;

            assert!(matches!(result, Err(LedgerError::Storage(_))));
            assert_eq!(count(&f.pool, "orders").await, 0);
            assert_eq!(count(&f.pool, "order_items").await, 0);
        }
    }

    mod history {
        use super::*;

        #[tokio::test]
        async fn most_recent_first_and_scoped_to_user() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            let first = f.ledger.create_order(&order(1, vec![line(apples, 1.0, 2.0)])).await.unwrap();
            f.ledger.create_order(&order(2, vec![line(apples, 1.0, 2.0)])).await.unwrap();
            let third = f.ledger.create_order(&order(1, vec![line(apples, 3.0, 2.0)])).await.unwrap();

            let mine: Vec<_> = f
                .ledger
                .user_history(UserId::new(1))
                .await
                .unwrap()
                .into_iter()
                .map(|o| o.id)
                .collect();
            assert_eq!(mine, vec![third, first]);

            let all = f.ledger.all_orders().await.unwrap();
            assert_eq!(all.len(), 3);
            assert_eq!(all[1].user_name, "user2");
        }

        #[tokio::test]
        async fn deleted_product_is_shown_by_id() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            f.ledger.create_order(&order(1, vec![line(apples, 1.0, 2.0)])).await.unwrap();
            f.catalog.delete(apples).await.unwrap();

            let history = f.ledger.user_history(UserId::new(1)).await.unwrap();
            assert_eq!(history[0].items[0].product_name, format!("#{}", apples));
        }

        #[tokio::test]
        async fn unknown_user_has_no_history() {
            let f = fixture().await;
            assert!(f.ledger.user_history(UserId::new(77)).await.unwrap().is_empty());
        }
    }

    mod shopping_list {
        use super::*;

        #[tokio::test]
        async fn excludes_completed_orders() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            f.ledger.create_order(&order(1, vec![line(apples, 3.0, 2.0)])).await.unwrap();
            let done = f.ledger.create_order(&order(2, vec![line(apples, 5.0, 2.0)])).await.unwrap();
            f.ledger.mark_completed(done).await.unwrap();

            let list = f.ledger.shopping_list().await.unwrap();
            assert_eq!(
                list,
                vec![ShoppingListEntry {
                    product_name: "Apples".into(),
                    total_quantity: 3.0
                }]
            );
        }

        #[tokio::test]
        async fn sums_per_product_sorted_by_name() {
            let f = fixture().await;
            let pears = product(&f, "Pears").await;
            let apples = product(&f, "Apples").await;
            f.ledger.create_order(&order(1, vec![line(pears, 1.0, 1.0), line(apples, 2.0, 1.0)])).await.unwrap();
            f.ledger.create_order(&order(2, vec![line(pears, 0.5, 1.0)])).await.unwrap();

            let list = f.ledger.shopping_list().await.unwrap();
            let names: Vec<_> = list.iter().map(|e| e.product_name.as_str()).collect();
            assert_eq!(names, vec!["Apples", "Pears"]);
            assert_eq!(list[1].total_quantity, 1.5);
        }
    }

    mod clear_completed {
        use super::*;

        #[tokio::test]
        async fn removes_only_completed_headers_and_lines() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            let keep = f.ledger.create_order(&order(1, vec![line(apples, 1.0, 2.0)])).await.unwrap();
            let gone = f
                .ledger
                .create_order(&order(1, vec![line(apples, 1.0, 2.0), line(apples, 2.0, 2.0)]))
                .await
                .unwrap();
            f.ledger.mark_completed(gone).await.unwrap();

            assert_eq!(f.ledger.clear_completed().await.unwrap(), 1);

            let remaining: Vec<_> = f.ledger.all_orders().await.unwrap().into_iter().map(|o| o.id).collect();
            assert_eq!(remaining, vec![keep]);
            assert_eq!(count(&f.pool, "order_items").await, 1);
        }

        #[tokio::test]
        async fn second_run_removes_nothing() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            let id = f.ledger.create_order(&order(1, vec![line(apples, 1.0, 2.0)])).await.unwrap();
            f.ledger.mark_completed(id).await.unwrap();

            assert_eq!(f.ledger.clear_completed().await.unwrap(), 1);
            assert_eq!(f.ledger.clear_completed().await.unwrap(), 0);
        }
    }

    mod mark_completed {
        use super::*;

        #[tokio::test]
        async fn missing_order_is_not_found() {
            let f = fixture().await;
            let err = f.ledger.mark_completed(OrderId::new(5)).await.unwrap_err();
            assert!(matches!(err, LedgerError::NotFound(_)));
        }

        #[tokio::test]
        async fn completing_twice_is_invalid_transition() {
            let f = fixture().await;
            let apples = product(&f, "Apples").await;
            let id = f.ledger.create_order(&order(1, vec![line(apples, 1.0, 2.0)])).await.unwrap();

            f.ledger.mark_completed(id).await.unwrap();
            let err = f.ledger.mark_completed(id).await.unwrap_err();
            assert!(matches!(err, LedgerError::InvalidTransition { from: OrderStatus::Completed, .. }));
        }
    }
}
