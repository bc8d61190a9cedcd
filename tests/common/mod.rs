//! Shared test helpers.
#![allow(dead_code)]

use chrono::NaiveDate;
use pricelens::config::EngineConfig;
use pricelens::domain::entities::competitor_catalog::{CompetitorCatalog, CompetitorProfile};
use pricelens::domain::entities::menu_entry::MenuEntry;
use pricelens::domain::entities::order::OrderRecord;
use pricelens::PriceLens;

pub fn setup() -> PriceLens {
    PriceLens::with_config(":memory:", EngineConfig::default()).unwrap()
}

pub fn setup_with(config: EngineConfig) -> PriceLens {
    PriceLens::with_config(":memory:", config).unwrap()
}

pub fn entry(id: &str, name: &str, price: f64) -> MenuEntry {
    MenuEntry::priced(id, name, price).unwrap()
}

/// Entries named `names`, all at `price`, with ids `{prefix}-{i}`.
pub fn menu(prefix: &str, names: &[&str], price: f64) -> Vec<MenuEntry> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| entry(&format!("{prefix}-{i}"), name, price))
        .collect()
}

pub fn catalog(id: &str, distance_km: f64, entries: Vec<MenuEntry>) -> CompetitorCatalog {
    CompetitorCatalog::from_profile(CompetitorProfile::new(id, id.to_uppercase(), distance_km).unwrap(), entries)
}

/// Store a competitor's menu and register it against `business_id`.
pub fn add_competitor(engine: &PriceLens, business_id: &str, id: &str, distance_km: f64, entries: Vec<MenuEntry>) {
    engine.import_catalog(id, entries).unwrap();
    engine
        .add_competitor(business_id, &CompetitorProfile::new(id, id.to_uppercase(), distance_km).unwrap())
        .unwrap();
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

pub fn order(d: u32, unit_price: f64, quantity: f64) -> OrderRecord {
    OrderRecord::new(day(d), unit_price, quantity)
}
