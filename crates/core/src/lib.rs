//! Financial aggregation engine for MonChantier.
//!
//! This crate contains pure aggregation logic with ZERO web or database dependencies.
//! It reads an in-memory snapshot of expenses, quotes and transfers and turns
//! it into display-ready aggregates.
//!
//! # Modules
//!
//! - `currency` - Exchange rate table and conversion through the base currency
//! - `records` - Financial record types, snapshot and entity labels
//! - `filter` - Primary filter and cross-filter selection state
//! - `rollup` - Totals per chantier or category
//! - `timeseries` - Monthly buckets with cumulative totals
//! - `balance` - Net balance per actor
//! - `dashboard` - Full aggregation pass, caching and display view

pub mod balance;
pub mod currency;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod records;
pub mod rollup;
pub mod timeseries;

pub use error::{AggregationError, AggregationResult};
