use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a price-change event was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Transactions,
    PriceHistory,
    Synthesized,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::Transactions => write!(f, "transactions"),
            EventSource::PriceHistory => write!(f, "price_history"),
            EventSource::Synthesized => write!(f, "synthesized"),
        }
    }
}

/// A transition of a product's price, with the demand observed on either side.
///
/// Quantities are average units sold per active day. `None` means the side
/// had no order data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeEvent {
    pub product_id: String,
    pub old_price: f64,
    pub new_price: f64,
    pub effective_date: Option<NaiveDate>,
    pub quantity_before: Option<f64>,
    pub quantity_after: Option<f64>,
    pub source: EventSource,
}

impl PriceChangeEvent {
    pub fn has_quantities(&self) -> bool {
        self.quantity_before.is_some() && self.quantity_after.is_some()
    }

    pub fn price_changed(&self) -> bool {
        self.old_price != self.new_price
    }
}
