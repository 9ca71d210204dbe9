//! Salary projection models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for projecting a physician's gross salary.
///
/// # Example
///
/// ```
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
/// assert_eq!(input.ceiling_wage, Decimal::from(10000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// The intermediate score before the coefficient is applied.
    pub intermediate_score: Decimal,
    /// The unit's screening and follow-up coefficient.
    pub screening_follow_up_coefficient: Decimal,
    /// The unit-type multiplier. Recorded, not applied to the wage formula.
    #[serde(default = "default_unit_multiplier")]
    pub unit_multiplier: Decimal,
    /// The ministry's current ceiling wage.
    pub ceiling_wage: Decimal,
    /// Whether the physician holds any specialty.
    #[serde(default)]
    pub is_specialist: bool,
    /// Whether the physician is a family medicine specialist.
    #[serde(default)]
    pub is_family_medicine_specialist: bool,
}

fn default_unit_multiplier() -> Decimal {
    Decimal::ONE
}

/// Gross salary breakdown. Every figure is rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// The supplied intermediate score.
    pub intermediate_score: Decimal,
    /// Intermediate score multiplied by the coefficient.
    pub score_adjusted_for_coefficient: Decimal,
    /// Fixed wage for the first 1000 points.
    pub first_1000_point_wage: Decimal,
    /// Wage for points above 1000.
    pub remaining_point_wage: Decimal,
    /// Total gross salary.
    pub total_gross_salary: Decimal,
}
