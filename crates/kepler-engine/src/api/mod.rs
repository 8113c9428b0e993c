pub mod config;
pub mod explorer;
pub mod types;
