pub mod extraction;
pub mod sqlite;
