use crate::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::order_source::{OrderStore, PriceHistorySource, TransactionSource};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteOrderRepo {
    conn: Mutex<Connection>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(date = raw, "skipping row with unparseable date");
            None
        }
    }
}

impl SqliteOrderRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_order(row: &rusqlite::Row) -> Result<Option<OrderRecord>, rusqlite::Error> {
        let date: String = row.get(0)?;
        Ok(parse_date(&date).map(|date| OrderRecord {
            date,
            unit_price: row.get(1).unwrap_or(0.0),
            quantity: row.get(2).unwrap_or(0.0),
        }))
    }

    fn row_to_history(row: &rusqlite::Row) -> Result<Option<PriceHistoryRecord>, rusqlite::Error> {
        let changed_at: String = row.get(2)?;
        Ok(parse_date(&changed_at).map(|changed_at| PriceHistoryRecord {
            old_price: row.get(0).unwrap_or(0.0),
            new_price: row.get(1).unwrap_or(0.0),
            changed_at,
        }))
    }
}

impl TransactionSource for SqliteOrderRepo {
    fn get_orders(&self, product_id: &str) -> Result<Vec<OrderRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT date, unit_price, quantity FROM orders WHERE product_id = ?1 ORDER BY date, id")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let orders = stmt
            .query_map(params![product_id], Self::row_to_order)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok().flatten())
            .collect();
        Ok(orders)
    }
}

impl PriceHistorySource for SqliteOrderRepo {
    fn get_history(&self, product_id: &str) -> Result<Vec<PriceHistoryRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT old_price, new_price, changed_at FROM price_history
                 WHERE product_id = ?1 ORDER BY changed_at DESC, id DESC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let history = stmt
            .query_map(params![product_id], Self::row_to_history)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok().flatten())
            .collect();
        Ok(history)
    }
}

impl OrderStore for SqliteOrderRepo {
    fn add_orders(&self, product_id: &str, orders: &[OrderRecord]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        for order in orders {
            tx.execute(
                "INSERT INTO orders (product_id, date, unit_price, quantity) VALUES (?1, ?2, ?3, ?4)",
                params![
                    product_id,
                    order.date.format(DATE_FORMAT).to_string(),
                    order.unit_price,
                    order.quantity
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add order: {e}")))?;
        }
        tx.commit().map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(orders.len())
    }

    fn add_history(&self, product_id: &str, history: &[PriceHistoryRecord]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        for record in history {
            tx.execute(
                "INSERT INTO price_history (product_id, old_price, new_price, changed_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    product_id,
                    record.old_price,
                    record.new_price,
                    record.changed_at.format(DATE_FORMAT).to_string()
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add price history: {e}")))?;
        }
        tx.commit().map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(history.len())
    }
}
