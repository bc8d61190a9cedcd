pub mod catalog_repo;
pub mod migrations;
pub mod order_repo;
