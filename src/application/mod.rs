pub mod aggregate;
pub mod cache;
pub mod elasticity;
pub mod estimate_elasticity;
pub mod extract_menu;
pub mod import;
pub mod matching;
pub mod price_events;
pub mod rank_competitors;
