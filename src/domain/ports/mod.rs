pub mod catalog_source;
pub mod matching_strategy;
pub mod menu_extractor;
pub mod order_source;
