pub mod config;
pub mod field;
pub mod quantity;
pub mod quota;
