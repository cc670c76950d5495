// Read-only tables derived from the cleaned dataset.

pub mod availability;
pub mod chain;

pub use availability::{AttributeAvailabilityCount, AvailabilityTable, count_availability};
pub use chain::{ChainSummary, ChainTable, aggregate as aggregate_chains};
