//! Per-chantier and per-category rollups.

pub mod aggregator;

#[cfg(test)]
mod props;

pub use aggregator::{Rollup, RollupAggregator, RollupDimension, UNASSIGNED_LABEL};
