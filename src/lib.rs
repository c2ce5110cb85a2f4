pub mod client;
pub mod config;
pub mod enrich;
pub mod history;
pub mod metrics;
pub mod models;
pub mod output;
