//! Percentage shares using the Largest Remainder Method.
//!
//! Chart legends show each slice as a percentage of the whole. Rounding each
//! slice independently can make the legend add up to 99.99 or 100.01, so the
//! rounded shares are corrected to sum to exactly 100:
//! 1. Calculate exact shares
//! 2. Round each share toward zero
//! 3. Hand the missing units to the shares with the largest fractional parts

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Share utility for chart legends.
pub struct ShareUtil;

impl ShareUtil {
    /// Returns each weight as a percentage of the total, summing to exactly 100.
    ///
    /// Returns `None` when the shares are not meaningful: a negative weight,
    /// a total that is not strictly positive, or a total too large for `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use monchantier_core::currency::ShareUtil;
    ///
    /// let shares = ShareUtil::percent_shares(&[dec!(1), dec!(1), dec!(1)], 2).unwrap();
    /// assert_eq!(shares.iter().sum::<rust_decimal::Decimal>(), dec!(100));
    /// ```
    #[must_use]
    pub fn percent_shares(weights: &[Decimal], decimal_places: u32) -> Option<Vec<Decimal>> {
        if weights.is_empty() {
            return Some(vec![]);
        }
        if weights.iter().any(Decimal::is_sign_negative) {
            return None;
        }
        let total = weights
            .iter()
            .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))?;
        if total <= Decimal::ZERO {
            return None;
        }

        let hundred = Decimal::ONE_HUNDRED;
        let unit = Decimal::new(1, decimal_places);

        // Divide first: a weight over the total never exceeds one.
        let exact: Vec<Decimal> = weights.iter().map(|w| *w / total * hundred).collect();

        let mut rounded: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        let sum_rounded: Decimal = rounded.iter().copied().sum();
        let remainder = hundred - sum_rounded;

        let units_to_distribute = (remainder / unit)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_u64()
            .unwrap_or(0);
        let units_to_distribute = usize::try_from(units_to_distribute).unwrap_or(0);

        if units_to_distribute == 0 {
            return Some(rounded);
        }

        let mut remainders: Vec<(usize, Decimal)> = exact
            .iter()
            .zip(rounded.iter())
            .enumerate()
            .map(|(i, (e, r))| (i, *e - *r))
            .collect();

        // Largest fraction first; stable so ties go to the earlier slice.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _) in remainders.iter().take(units_to_distribute) {
            rounded[*idx] += unit;
        }

        Some(rounded)
    }
}
