//! Price-change reconstruction from order logs.
//!
//! Orders are grouped by unit price (to the cent). The most recent price
//! group is expected to be the product's current price; the group before it
//! is the price it replaced. When the orders cannot support that reading,
//! the authoritative price-history log is used, and failing that a
//! conservative prior price is synthesized.
//!
//! Quantities on events are average units per active day, so price periods
//! of different lengths stay comparable.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use crate::domain::entities::price_change_event::{EventSource, PriceChangeEvent};
use crate::domain::error::DomainError;

/// Currency units within which a price group counts as the current price.
pub const PRICE_MATCH_TOLERANCE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconstructionMode {
    /// Only the change into the current price.
    #[default]
    Latest,
    /// Every observable change, from orders and the price-history log.
    Series,
}

impl fmt::Display for ReconstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconstructionMode::Latest => write!(f, "latest"),
            ReconstructionMode::Series => write!(f, "series"),
        }
    }
}

impl FromStr for ReconstructionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(ReconstructionMode::Latest),
            "series" => Ok(ReconstructionMode::Series),
            _ => Err(format!("Unknown reconstruction mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub mode: ReconstructionMode,
    pub tolerance: f64,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            mode: ReconstructionMode::Latest,
            tolerance: PRICE_MATCH_TOLERANCE,
        }
    }
}

/// Orders sold at one (cent-rounded) unit price.
#[derive(Debug, Clone)]
struct PriceGroup {
    cents: i64,
    first_seen: NaiveDate,
    last_seen: NaiveDate,
    total_quantity: f64,
    days: BTreeSet<NaiveDate>,
}

impl PriceGroup {
    fn price(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    fn daily_quantity(&self) -> f64 {
        self.total_quantity / self.days.len().max(1) as f64
    }
}

fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Price groups ordered by most recent sale first.
fn group_orders(orders: &[OrderRecord]) -> Vec<PriceGroup> {
    let mut groups: BTreeMap<i64, PriceGroup> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.is_usable()) {
        let cents = to_cents(order.unit_price);
        let group = groups.entry(cents).or_insert_with(|| PriceGroup {
            cents,
            first_seen: order.date,
            last_seen: order.date,
            total_quantity: 0.0,
            days: BTreeSet::new(),
        });
        group.first_seen = group.first_seen.min(order.date);
        group.last_seen = group.last_seen.max(order.date);
        group.total_quantity += order.quantity;
        group.days.insert(order.date);
    }

    let mut groups: Vec<PriceGroup> = groups.into_values().collect();
    groups.sort_by(|a, b| {
        b.last_seen
            .cmp(&a.last_seen)
            .then_with(|| b.first_seen.cmp(&a.first_seen))
            .then_with(|| a.cents.cmp(&b.cents))
    });
    groups
}

/// Average units per active day over the selected orders.
fn daily_quantity<'a>(orders: impl Iterator<Item = &'a OrderRecord>) -> Option<f64> {
    let mut total = 0.0;
    let mut days = BTreeSet::new();
    for order in orders.filter(|o| o.is_usable()) {
        total += order.quantity;
        days.insert(order.date);
    }
    if days.is_empty() {
        None
    } else {
        Some(total / days.len() as f64)
    }
}

fn history_event(product_id: &str, record: &PriceHistoryRecord, orders: &[OrderRecord]) -> PriceChangeEvent {
    PriceChangeEvent {
        product_id: product_id.to_string(),
        old_price: record.old_price,
        new_price: record.new_price,
        effective_date: Some(record.changed_at),
        quantity_before: daily_quantity(orders.iter().filter(|o| o.date < record.changed_at)),
        quantity_after: daily_quantity(orders.iter().filter(|o| o.date >= record.changed_at)),
        source: EventSource::PriceHistory,
    }
}

fn usable_history(history: &[PriceHistoryRecord]) -> Vec<&PriceHistoryRecord> {
    let mut usable: Vec<&PriceHistoryRecord> = history
        .iter()
        .filter(|h| {
            h.old_price.is_finite()
                && h.new_price.is_finite()
                && h.old_price > 0.0
                && h.new_price > 0.0
                && h.old_price != h.new_price
        })
        .collect();
    usable.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
    usable
}

/// Conservative guess at the price before `current_price`, undated.
fn synthesized_event(
    product_id: &str,
    current_price: f64,
    groups: &[PriceGroup],
    tolerance: f64,
) -> Option<PriceChangeEvent> {
    let prior = (current_price * 0.9).max(current_price - 1.0);
    if prior == current_price {
        return None;
    }
    let quantity_after = groups
        .first()
        .filter(|g| (g.price() - current_price).abs() <= tolerance)
        .map(PriceGroup::daily_quantity);
    Some(PriceChangeEvent {
        product_id: product_id.to_string(),
        old_price: prior,
        new_price: current_price,
        effective_date: None,
        quantity_before: None,
        quantity_after,
        source: EventSource::Synthesized,
    })
}

fn latest_events(
    product_id: &str,
    current_price: f64,
    orders: &[OrderRecord],
    history: &[PriceHistoryRecord],
    tolerance: f64,
) -> Vec<PriceChangeEvent> {
    let groups = group_orders(orders);

    if groups.len() >= 2 && (groups[0].price() - current_price).abs() <= tolerance {
        let event = PriceChangeEvent {
            product_id: product_id.to_string(),
            old_price: groups[1].price(),
            new_price: current_price,
            effective_date: Some(groups[0].first_seen),
            quantity_before: Some(groups[1].daily_quantity()),
            quantity_after: Some(groups[0].daily_quantity()),
            source: EventSource::Transactions,
        };
        if event.price_changed() {
            return vec![event];
        }
    }

    if let Some(record) = usable_history(history).first() {
        tracing::debug!(product_id, "using price-history log for price change");
        return vec![history_event(product_id, record, orders)];
    }

    tracing::debug!(product_id, "no usable price history; synthesizing prior price");
    synthesized_event(product_id, current_price, &groups, tolerance)
        .into_iter()
        .collect()
}

fn series_events(
    product_id: &str,
    current_price: f64,
    orders: &[OrderRecord],
    history: &[PriceHistoryRecord],
    tolerance: f64,
) -> Vec<PriceChangeEvent> {
    let groups = group_orders(orders);

    let mut chronological = groups.clone();
    chronological.sort_by(|a, b| {
        a.first_seen
            .cmp(&b.first_seen)
            .then_with(|| a.last_seen.cmp(&b.last_seen))
            .then_with(|| a.cents.cmp(&b.cents))
    });

    let mut events: Vec<PriceChangeEvent> = chronological
        .windows(2)
        .map(|pair| PriceChangeEvent {
            product_id: product_id.to_string(),
            old_price: pair[0].price(),
            new_price: pair[1].price(),
            effective_date: Some(pair[1].first_seen),
            quantity_before: Some(pair[0].daily_quantity()),
            quantity_after: Some(pair[1].daily_quantity()),
            source: EventSource::Transactions,
        })
        .collect();

    for record in usable_history(history) {
        let covered = events.iter().any(|e| {
            e.source == EventSource::Transactions
                && (e.old_price - record.old_price).abs() <= tolerance
                && (e.new_price - record.new_price).abs() <= tolerance
        });
        if !covered {
            events.push(history_event(product_id, record, orders));
        }
    }

    if events.is_empty() {
        events.extend(synthesized_event(product_id, current_price, &groups, tolerance));
    }

    events.retain(PriceChangeEvent::price_changed);
    // Newest first; undated events last.
    events.sort_by(|a, b| match (a.effective_date, b.effective_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    events
}

/// Reconstruct price-change events for a product, newest first.
///
/// Fails only on caller errors: an empty product id or an invalid current
/// price. Noisy or missing data degrades to the documented fallbacks.
pub fn reconstruct(
    product_id: &str,
    current_price: f64,
    transactions: &[OrderRecord],
    price_history: &[PriceHistoryRecord],
    config: &ReconstructionConfig,
) -> Result<Vec<PriceChangeEvent>, DomainError> {
    if product_id.trim().is_empty() {
        return Err(DomainError::InvalidInput("product id must not be empty".into()));
    }
    if !current_price.is_finite() || current_price < 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "product {product_id} has invalid current price {current_price}"
        )));
    }

    let events = match config.mode {
        ReconstructionMode::Latest => {
            latest_events(product_id, current_price, transactions, price_history, config.tolerance)
        }
        ReconstructionMode::Series => {
            series_events(product_id, current_price, transactions, price_history, config.tolerance)
        }
    };
    Ok(events.into_iter().filter(PriceChangeEvent::price_changed).collect())
}
