//! Gross salary projection (Article 18(2)(a)(6)).

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::Regulation;
use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryInput, SalaryResult};

use super::rounding::round_money;

/// Projects a physician's gross salary with the compiled-in regulation.
///
/// See [`compute_salary_with`].
pub fn compute_salary(input: &SalaryInput) -> EngineResult<SalaryResult> {
    compute_salary_with(Regulation::current(), input)
}

/// Projects a physician's gross salary.
///
/// The intermediate score is scaled by the screening and follow-up
/// coefficient. The first 1000 points pay a fixed share of the ceiling wage
/// (higher for family medicine specialists) and every point above that pays
/// `ceiling_wage × 0.000522`.
///
/// `unit_multiplier` and `is_specialist` do not change the result.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if the ceiling wage or the
/// intermediate score is negative.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::compute_salary;
/// use hyp_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput {
///     intermediate_score: Decimal::from(1200),
///     screening_follow_up_coefficient: Decimal::new(110, 2),
///     unit_multiplier: Decimal::ONE,
///     ceiling_wage: Decimal::from(10000),
///     is_specialist: false,
///     is_family_medicine_specialist: false,
/// };
///
/// let result = compute_salary(&input).unwrap();
/// assert_eq!(result.score_adjusted_for_coefficient, Decimal::from(1320));
/// assert_eq!(result.total_gross_salary, Decimal::new(952040, 2));
/// ```
pub fn compute_salary_with(
    regulation: &Regulation,
    input: &SalaryInput,
) -> EngineResult<SalaryResult> {
    if input.ceiling_wage < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "ceiling_wage",
            format!("must not be negative, got {}", input.ceiling_wage),
        ));
    }
    if input.intermediate_score < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "intermediate_score",
            format!("must not be negative, got {}", input.intermediate_score),
        ));
    }

    let rates = regulation.salary_rates();

    let adjusted = input.intermediate_score * input.screening_follow_up_coefficient;

    let first_rate = if input.is_family_medicine_specialist {
        rates.family_medicine_specialist_rate
    } else {
        rates.standard_rate
    };
    let first_points_wage = input.ceiling_wage * first_rate;

    let points_above = (adjusted - rates.base_points).max(Decimal::ZERO);
    let remaining_wage = points_above * input.ceiling_wage * rates.per_point_rate;

    debug!(
        adjusted_score = %adjusted,
        points_above = %points_above,
        first_rate = %first_rate,
        unit_multiplier = %input.unit_multiplier,
        "Salary components"
    );

    let result = SalaryResult {
        intermediate_score: round_money(input.intermediate_score),
        score_adjusted_for_coefficient: round_money(adjusted),
        first_1000_point_wage: round_money(first_points_wage),
        remaining_point_wage: round_money(remaining_wage),
        total_gross_salary: round_money(first_points_wage + remaining_wage),
    };

    info!(
        adjusted_score = %result.score_adjusted_for_coefficient,
        total_gross_salary = %result.total_gross_salary,
        "Salary projected"
    );

    Ok(result)
}
