use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical sale of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub date: NaiveDate,
    pub unit_price: f64,
    pub quantity: f64,
}

impl OrderRecord {
    pub fn new(date: NaiveDate, unit_price: f64, quantity: f64) -> Self {
        Self {
            date,
            unit_price,
            quantity,
        }
    }

    /// Orders with a non-positive or non-finite price or quantity are noise.
    pub fn is_usable(&self) -> bool {
        self.unit_price.is_finite()
            && self.unit_price > 0.0
            && self.quantity.is_finite()
            && self.quantity > 0.0
    }
}

/// A deliberate price change recorded by the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryRecord {
    pub old_price: f64,
    pub new_price: f64,
    pub changed_at: NaiveDate,
}

impl PriceHistoryRecord {
    pub fn new(old_price: f64, new_price: f64, changed_at: NaiveDate) -> Self {
        Self {
            old_price,
            new_price,
            changed_at,
        }
    }
}
