use crate::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use crate::domain::error::DomainError;

/// Historical sales of a product, in any order.
pub trait TransactionSource: Send + Sync {
    fn get_orders(&self, product_id: &str) -> Result<Vec<OrderRecord>, DomainError>;
}

/// Authoritative log of deliberate price changes, in any order.
pub trait PriceHistorySource: Send + Sync {
    fn get_history(&self, product_id: &str) -> Result<Vec<PriceHistoryRecord>, DomainError>;
}

/// Write access used when importing sales and price history.
pub trait OrderStore: Send + Sync {
    fn add_orders(&self, product_id: &str, orders: &[OrderRecord]) -> Result<usize, DomainError>;
    fn add_history(&self, product_id: &str, history: &[PriceHistoryRecord]) -> Result<usize, DomainError>;
}
