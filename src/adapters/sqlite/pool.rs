//! SQLite connection pool and idempotent schema creation.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        telegram_id   INTEGER PRIMARY KEY,
        first_name    TEXT NOT NULL DEFAULT '',
        username      TEXT,
        is_admin      INTEGER NOT NULL DEFAULT 0,
        language_code TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL UNIQUE,
        price_per_kg REAL NOT NULL CHECK (price_per_kg > 0),
        is_available INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id     INTEGER NOT NULL,
        user_name   TEXT NOT NULL,
        created_at  INTEGER NOT NULL,
        total_price REAL NOT NULL,
        status      TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'confirmed', 'completed'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id       INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
        product_id     INTEGER NOT NULL,
        quantity_kg    REAL NOT NULL CHECK (quantity_kg > 0),
        price_at_order REAL NOT NULL CHECK (price_at_order > 0)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status)",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)",
];

/// Opens (creating if missing) the database file.
pub async fn connect(
    path: &Path,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(acquire_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open database {}: {}", path.display(), e),
            )
        })?;

    tracing::info!(path = %path.display(), max_connections, "Database connection established");
    Ok(pool)
}

/// Opens a private in-memory database.
///
/// Uses a single connection that never expires, so the data lives as long
/// as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open in-memory database: {}", e),
            )
        })?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open in-memory database: {}", e),
            )
        })
}

/// Creates all tables and indexes. Safe to run on every startup.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), DomainError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to create schema: {}", e),
            )
        })?;
    }
    tracing::debug!("Database schema ready");
    Ok(())
}
