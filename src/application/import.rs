use crate::domain::entities::competitor_catalog::CompetitorProfile;
use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_source::CatalogStore;
use crate::domain::ports::order_source::OrderStore;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub owner_id: String,
    pub received: usize,
    pub stored: usize,
    pub skipped: Vec<String>,
}

/// Keep the first entry for each id; later repeats are reported, not stored.
pub fn dedup_entries(entries: Vec<MenuEntry>) -> (Vec<MenuEntry>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut skipped = Vec::new();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        if seen.insert(entry.id.clone()) {
            kept.push(entry);
        } else {
            skipped.push(format!("duplicate id {}", entry.id));
        }
    }
    (kept, skipped)
}

/// Loads menus, competitors, orders and price history into the store.
pub struct ImportUseCase {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
}

impl ImportUseCase {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    /// Replace an owner's menu. Entries repeating an earlier id are skipped.
    pub fn import_catalog(&self, owner_id: &str, entries: Vec<MenuEntry>) -> Result<ImportSummary, DomainError> {
        if owner_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("owner id must not be empty".into()));
        }
        let received = entries.len();
        let (kept, skipped) = dedup_entries(entries);
        self.catalog.replace_entries(owner_id, &kept)?;
        tracing::info!(owner_id, stored = kept.len(), skipped = skipped.len(), "imported catalog");
        Ok(ImportSummary {
            owner_id: owner_id.to_string(),
            received,
            stored: kept.len(),
            skipped,
        })
    }

    pub fn add_competitor(&self, business_id: &str, profile: &CompetitorProfile) -> Result<(), DomainError> {
        if business_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("business id must not be empty".into()));
        }
        if business_id == profile.competitor_id {
            return Err(DomainError::InvalidInput("a business cannot be its own competitor".into()));
        }
        self.catalog.upsert_competitor(business_id, profile)
    }

    pub fn import_orders(&self, product_id: &str, orders: &[OrderRecord]) -> Result<ImportSummary, DomainError> {
        if product_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("product id must not be empty".into()));
        }
        let stored = self.orders.add_orders(product_id, orders)?;
        Ok(ImportSummary {
            owner_id: product_id.to_string(),
            received: orders.len(),
            stored,
            skipped: Vec::new(),
        })
    }

    pub fn import_history(&self, product_id: &str, history: &[PriceHistoryRecord]) -> Result<ImportSummary, DomainError> {
        if product_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("product id must not be empty".into()));
        }
        let stored = self.orders.add_history(product_id, history)?;
        Ok(ImportSummary {
            owner_id: product_id.to_string(),
            received: history.len(),
            stored,
            skipped: Vec::new(),
        })
    }
}
