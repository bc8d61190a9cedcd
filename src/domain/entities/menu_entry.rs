use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "USD".to_string()
}

/// A single priced item on a menu, ours or a competitor's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMenuEntry")]
pub struct MenuEntry {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub currency: String,
}

/// Unvalidated shape accepted on input. A missing id gets a fresh uuid.
#[derive(Debug, Deserialize)]
struct RawMenuEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: Option<String>,
    price: f64,
    #[serde(default = "default_currency")]
    currency: String,
}

impl TryFrom<RawMenuEntry> for MenuEntry {
    type Error = DomainError;

    fn try_from(raw: RawMenuEntry) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        MenuEntry::new(id, raw.name, raw.category, raw.price, raw.currency)
    }
}

impl MenuEntry {
    /// Build an entry, rejecting caller contract violations.
    ///
    /// An empty name is accepted: it is a data-quality problem that the
    /// matcher skips, not a programming error.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Option<String>,
        price: f64,
        currency: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidInput("menu entry id must not be empty".into()));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "menu entry {id} has invalid price {price}"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            category,
            price,
            currency: currency.into(),
        })
    }

    /// Shorthand for a USD entry without a category.
    pub fn priced(id: impl Into<String>, name: impl Into<String>, price: f64) -> Result<Self, DomainError> {
        Self::new(id, name, None, price, default_currency())
    }

    /// Entries without a name or with a zero price carry no matching signal.
    pub fn is_matchable(&self) -> bool {
        !self.name.trim().is_empty() && self.price > 0.0
    }
}

/// Mean price over entries with a positive price. `None` for no priced entries.
pub fn average_price(entries: &[MenuEntry]) -> Option<f64> {
    let prices: Vec<f64> = entries.iter().map(|e| e.price).filter(|p| *p > 0.0).collect();
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_price() {
        assert!(MenuEntry::priced("a", "Latte", -1.0).is_err());
    }

    #[test]
    fn test_rejects_empty_id() {
        assert!(MenuEntry::priced("  ", "Latte", 4.0).is_err());
    }

    #[test]
    fn test_accepts_empty_name_but_not_matchable() {
        let entry = MenuEntry::priced("a", "", 4.0).unwrap();
        assert!(!entry.is_matchable());
    }

    #[test]
    fn test_deserialize_validates_and_defaults() {
        let entry: MenuEntry = serde_json::from_str(r#"{"name":"Mocha","price":5.0}"#).unwrap();
        assert_eq!(entry.currency, "USD");
        assert!(!entry.id.is_empty());

        let bad: Result<MenuEntry, _> = serde_json::from_str(r#"{"id":"x","name":"Mocha","price":-2}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_average_price_ignores_unpriced() {
        let entries = vec![
            MenuEntry::priced("a", "Latte", 4.0).unwrap(),
            MenuEntry::priced("b", "Water", 0.0).unwrap(),
            MenuEntry::priced("c", "Mocha", 5.0).unwrap(),
        ];
        assert_eq!(average_price(&entries), Some(4.5));
        assert_eq!(average_price(&[]), None);
    }
}
