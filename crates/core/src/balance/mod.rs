//! Actor balance calculation.

mod actor;

#[cfg(test)]
mod props;

pub use actor::{ActorBalance, BalanceCalculator};
