//! Criterion coefficient calculation.
//!
//! This module maps a criterion's success percentage to its coefficient via
//! the Annex 2 banding function and evaluates a complete criterion result,
//! including carry-over and the high-population override.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CoefficientBounds, CriterionBand, Regulation};
use crate::models::{AuditStep, CriterionInput, CriterionResult, StatusColor};

use super::carry_over::{carry_out_to_next_period, remaining_count};
use super::rounding::{round_coefficient, round_percent};
use super::success_rate::{success_percent, success_percent_with_carry};

/// The clause reference for criterion coefficients.
pub const CRITERION_COEFFICIENT_CLAUSE: &str = "Annex 1-2";

/// A coefficient and the status colour it was banded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandedCoefficient {
    /// The criterion coefficient.
    pub coefficient: Decimal,
    /// The status colour.
    pub status: StatusColor,
}

/// Maps a success percentage to a criterion coefficient.
///
/// | Success | Coefficient | Status |
/// |---|---|---|
/// | 0 | 0.90 | red |
/// | below minimum | 0.90 → 1.00 linearly, clamped to `[0.90, cap]` (cap 0.9999) | red |
/// | minimum ..= maximum | 1.00 | green |
/// | above maximum, up to 100 | 1.00 | yellow |
/// | above 100 | 1.00 | orange |
///
/// Only the red band varies the coefficient. Yellow and orange are warnings
/// and pay exactly like green.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::coefficient_from_success;
/// use hyp_engine::config::{CriterionBand, Regulation};
/// use hyp_engine::models::StatusColor;
/// use rust_decimal::Decimal;
///
/// let band = CriterionBand::new(40, 90);
/// let bounds = Regulation::current().coefficient_bounds();
///
/// let banded = coefficient_from_success(Decimal::from(20), &band, bounds);
/// assert_eq!(banded.coefficient, Decimal::new(95, 2));
/// assert_eq!(banded.status, StatusColor::Red);
///
/// let banded = coefficient_from_success(Decimal::from(95), &band, bounds);
/// assert_eq!(banded.coefficient, Decimal::ONE);
/// assert_eq!(banded.status, StatusColor::Yellow);
/// ```
pub fn coefficient_from_success(
    success_percent: Decimal,
    band: &CriterionBand,
    bounds: &CoefficientBounds,
) -> BandedCoefficient {
    if success_percent.is_zero() {
        return BandedCoefficient {
            coefficient: bounds.nothing_done_coefficient,
            status: StatusColor::Red,
        };
    }

    if success_percent < band.minimum_percent {
        let floor = bounds.below_minimum_coefficient_min;
        let interpolated =
            floor + (success_percent / band.minimum_percent) * (Decimal::ONE - floor);
        return BandedCoefficient {
            coefficient: interpolated
                .min(bounds.below_minimum_coefficient_cap)
                .max(floor),
            status: StatusColor::Red,
        };
    }

    let status = if success_percent <= band.maximum_percent {
        StatusColor::Green
    } else if success_percent <= Decimal::ONE_HUNDRED {
        StatusColor::Yellow
    } else {
        StatusColor::Orange
    };

    BandedCoefficient {
        coefficient: Decimal::ONE,
        status,
    }
}

/// The result of evaluating one criterion, including the audit step.
#[derive(Debug, Clone)]
pub struct CriterionEvaluation {
    /// The published criterion result (rounded).
    pub result: CriterionResult,
    /// The unrounded coefficient that enters the criterion product.
    pub raw_coefficient: Decimal,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates one criterion of a unit.
///
/// A zero requirement short-circuits to a green 1.00 result. Otherwise the
/// carry-adjusted success is banded with [`coefficient_from_success`],
/// unless `over_capacity` is set and the carry-adjusted success reaches the
/// band minimum, in which case the criterion is forced to a green 1.00.
///
/// # Arguments
///
/// * `input` - The criterion's performance data
/// * `band` - The criterion's success band
/// * `regulation` - The regulation supplying bounds and carry-over rules
/// * `over_capacity` - Whether the population exceeds the unit type's over-capacity threshold
/// * `step_number` - The step number for audit trail sequencing
pub fn evaluate_criterion(
    input: &CriterionInput,
    band: &CriterionBand,
    regulation: &Regulation,
    over_capacity: bool,
    step_number: u32,
) -> CriterionEvaluation {
    if input.required == 0 {
        let result = CriterionResult {
            criterion: input.criterion,
            required: 0,
            done: input.done,
            carry_in: input.carry_in,
            success_percent: Decimal::ONE_HUNDRED,
            success_percent_with_carry: Decimal::ONE_HUNDRED,
            coefficient: Decimal::ONE,
            remaining: 0,
            carry_out: 0,
            status: StatusColor::Green,
            explanation: "Target population zero, coefficient fixed at 1".to_string(),
        };

        let audit_step = AuditStep {
            step_number,
            rule_id: "criterion_coefficient".to_string(),
            rule_name: "Criterion Coefficient".to_string(),
            clause_ref: CRITERION_COEFFICIENT_CLAUSE.to_string(),
            input: serde_json::json!({
                "criterion": input.criterion.code(),
                "required": 0,
                "done": input.done,
                "carry_in": input.carry_in
            }),
            output: serde_json::json!({
                "coefficient": "1",
                "status": "green",
                "zero_target": true
            }),
            reasoning: format!(
                "{}: target population zero, coefficient fixed at 1",
                input.criterion
            ),
        };

        debug!(criterion = %input.criterion, "Zero target, coefficient fixed at 1");

        return CriterionEvaluation {
            result,
            raw_coefficient: Decimal::ONE,
            audit_step,
        };
    }

    let plain = success_percent(input.done, input.required);
    let adjusted = success_percent_with_carry(
        input.done,
        input.required,
        input.carry_in,
        regulation.carry_over_rules().minimum_done_ratio,
    );

    let override_applied = over_capacity && adjusted.percent >= band.minimum_percent;
    let banded = if override_applied {
        BandedCoefficient {
            coefficient: Decimal::ONE,
            status: StatusColor::Green,
        }
    } else {
        coefficient_from_success(adjusted.percent, band, regulation.coefficient_bounds())
    };

    let explanation = match banded.status {
        StatusColor::Red => format!(
            "Below minimum success (%{})",
            band.minimum_percent.normalize()
        ),
        StatusColor::Green => "Within ideal range".to_string(),
        StatusColor::Yellow => "Above maximum success (carry-over loss possible)".to_string(),
        StatusColor::Orange => "Above 100%, surplus carries to next period".to_string(),
    };

    let result = CriterionResult {
        criterion: input.criterion,
        required: input.required,
        done: input.done,
        carry_in: input.carry_in,
        success_percent: round_percent(plain),
        success_percent_with_carry: round_percent(adjusted.percent),
        coefficient: round_coefficient(banded.coefficient),
        remaining: remaining_count(input.done, input.required),
        carry_out: carry_out_to_next_period(input.done, input.required),
        status: banded.status,
        explanation,
    };

    let reasoning = if override_applied {
        format!(
            "{}: {}% (with carry) meets minimum {}% in an over-capacity unit, coefficient forced to 1",
            input.criterion,
            result.success_percent_with_carry,
            band.minimum_percent.normalize()
        )
    } else {
        format!(
            "{}: {}% (with carry) against band {}-{}% gives coefficient {} ({:?})",
            input.criterion,
            result.success_percent_with_carry,
            band.minimum_percent.normalize(),
            band.maximum_percent.normalize(),
            result.coefficient,
            result.status
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "criterion_coefficient".to_string(),
        rule_name: "Criterion Coefficient".to_string(),
        clause_ref: CRITERION_COEFFICIENT_CLAUSE.to_string(),
        input: serde_json::json!({
            "criterion": input.criterion.code(),
            "required": input.required,
            "done": input.done,
            "carry_in": input.carry_in,
            "minimum_percent": band.minimum_percent.to_string(),
            "maximum_percent": band.maximum_percent.to_string(),
            "over_capacity": over_capacity
        }),
        output: serde_json::json!({
            "success_percent": result.success_percent.to_string(),
            "success_percent_with_carry": result.success_percent_with_carry.to_string(),
            "used_carry": adjusted.used_carry,
            "high_population_override": override_applied,
            "coefficient": result.coefficient.to_string(),
            "status": result.status,
            "carry_out": result.carry_out
        }),
        reasoning,
    };

    debug!(
        criterion = %input.criterion,
        success = %result.success_percent_with_carry,
        coefficient = %result.coefficient,
        status = ?result.status,
        "Evaluated criterion"
    );

    CriterionEvaluation {
        result,
        raw_coefficient: banded.coefficient,
        audit_step,
    }
}
