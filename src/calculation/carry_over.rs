//! Carry-over into the next period.

use super::success_rate::success_percent;

/// Returns the surplus that carries into the next period.
///
/// Only in-period over-performance carries: when `done` exceeds `required`
/// the difference carries out. Carry-in from the previous period is never
/// passed on, whether or not it was applied.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::carry_out_to_next_period;
///
/// assert_eq!(carry_out_to_next_period(130, 100), 30);
/// assert_eq!(carry_out_to_next_period(100, 100), 0);
/// assert_eq!(carry_out_to_next_period(85, 100), 0);
/// ```
pub fn carry_out_to_next_period(done: u32, required: u32) -> u32 {
    if success_percent(done, required) > rust_decimal::Decimal::ONE_HUNDRED {
        done - required
    } else {
        0
    }
}

/// Returns the procedures still missing to meet the requirement.
pub fn remaining_count(done: u32, required: u32) -> u32 {
    required.saturating_sub(done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surplus_carries_out() {
        assert_eq!(carry_out_to_next_period(101, 100), 1);
    }

    #[test]
    fn test_exact_target_carries_nothing() {
        assert_eq!(carry_out_to_next_period(50, 50), 0);
    }

    #[test]
    fn test_zero_required_carries_nothing() {
        // success is defined as 100% when nothing is required
        assert_eq!(carry_out_to_next_period(20, 0), 0);
    }

    #[test]
    fn test_remaining_count_saturates() {
        assert_eq!(remaining_count(85, 100), 15);
        assert_eq!(remaining_count(120, 100), 0);
    }
}
