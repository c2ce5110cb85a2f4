pub mod catalog;
pub mod snapshot;

#[cfg(test)]
mod enrich_tests;

pub use catalog::*;
pub use snapshot::*;
