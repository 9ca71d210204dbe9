//! Success percentage calculations.
//!
//! This module turns done/required counts into success percentages and
//! applies the carry-in eligibility rule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Returns `done / required × 100`, or 100 when nothing is required.
///
/// The result is not clamped and exceeds 100 on over-performance.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::success_percent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(success_percent(85, 100), Decimal::from(85));
/// assert_eq!(success_percent(0, 0), Decimal::from(100));
/// assert_eq!(success_percent(120, 100), Decimal::from(120));
/// ```
pub fn success_percent(done: u32, required: u32) -> Decimal {
    if required == 0 {
        return Decimal::ONE_HUNDRED;
    }
    Decimal::from(done) * Decimal::ONE_HUNDRED / Decimal::from(required)
}

/// A success percentage after the carry-in eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryAdjustedSuccess {
    /// The success percentage, including carry-in when it was applied.
    pub percent: Decimal,
    /// Whether the carry-in was applied.
    pub used_carry: bool,
}

/// Returns the success percentage including carry-in from the previous period.
///
/// Carry-in only counts when it is positive and at least
/// `minimum_done_ratio` of the requirement was done within the period
/// itself. Otherwise the plain [`success_percent`] is returned.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::success_percent_with_carry;
/// use rust_decimal::Decimal;
///
/// let ratio = Decimal::new(10, 2);
///
/// let applied = success_percent_with_carry(85, 100, 10, ratio);
/// assert!(applied.used_carry);
/// assert_eq!(applied.percent, Decimal::from(95));
///
/// // Only 5% done in-period: carry-in is ignored.
/// let ignored = success_percent_with_carry(5, 100, 50, ratio);
/// assert!(!ignored.used_carry);
/// assert_eq!(ignored.percent, Decimal::from(5));
/// ```
pub fn success_percent_with_carry(
    done: u32,
    required: u32,
    carry_in: u32,
    minimum_done_ratio: Decimal,
) -> CarryAdjustedSuccess {
    if required == 0 {
        return CarryAdjustedSuccess {
            percent: Decimal::ONE_HUNDRED,
            used_carry: false,
        };
    }

    let minimum_done = Decimal::from(required) * minimum_done_ratio;

    if Decimal::from(done) >= minimum_done && carry_in > 0 {
        let with_carry = Decimal::from(done) + Decimal::from(carry_in);
        return CarryAdjustedSuccess {
            percent: with_carry * Decimal::ONE_HUNDRED / Decimal::from(required),
            used_carry: true,
        };
    }

    CarryAdjustedSuccess {
        percent: success_percent(done, required),
        used_carry: false,
    }
}

/// Procedures still needed to reach the 40%, 70% and 90% success marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingCounts {
    /// Procedures missing to reach 40%.
    pub to_40_percent: u32,
    /// Procedures missing to reach 70%.
    pub to_70_percent: u32,
    /// Procedures missing to reach 90%.
    pub to_90_percent: u32,
}

/// Returns how many procedures are still needed to reach each success mark.
///
/// Each target is `ceil(required × mark)`; counts never go below zero.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::remaining_to_thresholds;
///
/// let remaining = remaining_to_thresholds(125, 40);
/// assert_eq!(remaining.to_40_percent, 10);
/// assert_eq!(remaining.to_70_percent, 48);
/// assert_eq!(remaining.to_90_percent, 73);
/// ```
pub fn remaining_to_thresholds(required: u32, done: u32) -> RemainingCounts {
    let to_mark = |percent: u64| -> u32 {
        let target = (u64::from(required) * percent).div_ceil(100);
        target.saturating_sub(u64::from(done)) as u32
    };

    RemainingCounts {
        to_40_percent: to_mark(40),
        to_70_percent: to_mark(70),
        to_90_percent: to_mark(90),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ratio() -> Decimal {
        dec("0.10")
    }

    #[test]
    fn test_zero_required_is_full_success() {
        assert_eq!(success_percent(0, 0), dec("100"));
        assert_eq!(success_percent(7, 0), dec("100"));
    }

    #[test]
    fn test_partial_success() {
        assert_eq!(success_percent(45, 50), dec("90"));
        assert_eq!(success_percent(1, 3).round_dp(2), dec("33.33"));
    }

    #[test]
    fn test_success_exceeds_100() {
        assert_eq!(success_percent(130, 100), dec("130"));
    }

    #[test]
    fn test_carry_applied_when_gate_met() {
        let result = success_percent_with_carry(10, 100, 20, ratio());
        assert!(result.used_carry);
        assert_eq!(result.percent, dec("30"));
    }

    #[test]
    fn test_carry_gate_is_inclusive() {
        // 10% of 100 is exactly 10.
        assert!(success_percent_with_carry(10, 100, 1, ratio()).used_carry);
        assert!(!success_percent_with_carry(9, 100, 1, ratio()).used_carry);
    }

    #[test]
    fn test_carry_gate_with_fractional_minimum() {
        // 10% of 15 is 1.5, so 1 done is not enough but 2 is.
        assert!(!success_percent_with_carry(1, 15, 5, ratio()).used_carry);
        assert!(success_percent_with_carry(2, 15, 5, ratio()).used_carry);
    }

    #[test]
    fn test_zero_carry_is_never_applied() {
        let result = success_percent_with_carry(50, 100, 0, ratio());
        assert!(!result.used_carry);
        assert_eq!(result.percent, dec("50"));
    }

    #[test]
    fn test_zero_required_short_circuits() {
        let result = success_percent_with_carry(5, 0, 10, ratio());
        assert!(!result.used_carry);
        assert_eq!(result.percent, dec("100"));
    }

    #[test]
    fn test_remaining_never_negative() {
        let remaining = remaining_to_thresholds(100, 95);
        assert_eq!(remaining.to_40_percent, 0);
        assert_eq!(remaining.to_70_percent, 0);
        assert_eq!(remaining.to_90_percent, 0);
    }

    #[test]
    fn test_remaining_rounds_targets_up() {
        // 40% of 11 is 4.4, so 5 are needed.
        let remaining = remaining_to_thresholds(11, 0);
        assert_eq!(remaining.to_40_percent, 5);
        assert_eq!(remaining.to_70_percent, 8);
        assert_eq!(remaining.to_90_percent, 10);
    }
}
