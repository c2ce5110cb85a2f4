pub mod aggregate;
pub mod config;
pub mod heatmaps;
pub mod overview;
pub mod peak_hours;
pub mod rankings;
pub mod report;
pub mod skips;
pub mod special_days;
pub mod trend;
pub mod week_split;


pub use config::*;
pub use report::*;
