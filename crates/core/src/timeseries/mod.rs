//! Time-series bucketing by calendar month.

mod bucketer;
mod month;

#[cfg(test)]
mod props;

pub use bucketer::{TimeBucket, TimeSeriesBucketer};
pub use month::MonthKey;
