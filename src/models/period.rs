//! Calculation period parsing.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

/// Parses a `YYYY-MM` period and returns the first day of that month.
///
/// # Example
///
/// ```
/// use hyp_engine::models::period_start;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     period_start("2025-12").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
/// );
/// assert!(period_start("2025-13").is_err());
/// ```
pub fn period_start(period: &str) -> EngineResult<NaiveDate> {
    let well_formed = period.len() == 7
        && period.as_bytes()[4] == b'-'
        && period
            .bytes()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit());

    if !well_formed {
        return Err(EngineError::invalid_argument(
            "period",
            format!("expected YYYY-MM, got '{}'", period),
        ));
    }

    NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").map_err(|e| {
        EngineError::invalid_argument("period", format!("'{}' is not a valid month: {}", period, e))
    })
}
