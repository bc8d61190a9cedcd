pub mod entities;
pub mod error;
pub mod ports;
pub mod similarity;
pub mod values;
