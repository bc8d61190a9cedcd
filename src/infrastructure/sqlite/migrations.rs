use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS menu_entries (
            owner_id TEXT NOT NULL,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            category TEXT,
            price REAL NOT NULL,
            currency TEXT NOT NULL DEFAULT 'USD',
            position INTEGER NOT NULL,
            PRIMARY KEY (owner_id, id)
        );

        CREATE TABLE IF NOT EXISTS competitors (
            business_id TEXT NOT NULL,
            competitor_id TEXT NOT NULL,
            name TEXT NOT NULL,
            distance_km REAL NOT NULL,
            PRIMARY KEY (business_id, competitor_id)
        );

        CREATE TABLE IF NOT EXISTS catalog_versions (
            owner_id TEXT PRIMARY KEY,
            version INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id TEXT NOT NULL,
            date TEXT NOT NULL,
            unit_price REAL NOT NULL,
            quantity REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS price_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id TEXT NOT NULL,
            old_price REAL NOT NULL,
            new_price REAL NOT NULL,
            changed_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_menu_entries_id ON menu_entries(id);
        CREATE INDEX IF NOT EXISTS idx_orders_product ON orders(product_id, date);
        CREATE INDEX IF NOT EXISTS idx_price_history_product ON price_history(product_id, changed_at);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
