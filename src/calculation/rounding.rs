//! Rounding checkpoints.
//!
//! Coefficients are published to 4 decimal places, percentages and money to
//! 2. Midpoints round away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a coefficient to 4 decimal places.
pub fn round_coefficient(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to 2 decimal places.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount or score to 2 decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
