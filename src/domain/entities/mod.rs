pub mod competitor_catalog;
pub mod menu_entry;
pub mod order;
pub mod price_change_event;
