//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod rates;
pub mod share;

#[cfg(test)]
mod props;

pub use conversion::{checked_diff, checked_sum, from_base, round_display, to_base};
pub use rates::ExchangeRateTable;
pub use share::ShareUtil;
