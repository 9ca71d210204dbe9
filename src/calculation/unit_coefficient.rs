//! Unit screening and follow-up coefficient.
//!
//! This module ties the criterion engine, ceiling and unit multiplier
//! together into the unit's final coefficient for a period.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::{CriterionBand, Regulation};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, UnitInput, UnitResult, period_start};

use super::ceiling::calculate_ceiling_coefficient;
use super::criterion_coefficient::evaluate_criterion;
use super::rounding::round_coefficient;
use super::unit_multiplier::calculate_unit_multiplier;

/// Exception note recorded when the salary-basis score is below the floor.
pub const LOW_SCORE_EXCEPTION: &str =
    "Salary-basis score below 1000, screening and follow-up coefficient fixed at 1";

/// Exception note recorded for new units.
pub const NEW_UNIT_EXCEPTION: &str =
    "New unit (first 18 months), coefficient 1 for the first 2000 points";

/// Warning recorded for new units.
pub const NEW_UNIT_WARNING: &str = "New unit exemption applied";

/// Computes a unit's screening and follow-up coefficient with the
/// compiled-in regulation.
///
/// See [`compute_unit_coefficient_with`].
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::compute_unit_coefficient;
/// use hyp_engine::models::{CriterionInput, CriterionType, UnitInput, UnitType};
/// use rust_decimal::Decimal;
///
/// let mut input = UnitInput::new("ASM-001-01", "2025-12", 3500, UnitType::Normal);
/// input.criteria = vec![
///     CriterionInput::new(CriterionType::DmScreening, 100, 85).with_carry_in(10),
///     CriterionInput::new(CriterionType::DmFollowUp, 50, 45),
/// ];
///
/// let result = compute_unit_coefficient(&input).unwrap();
/// assert_eq!(result.ceiling_coefficient, Decimal::new(11429, 4));
/// assert_eq!(result.screening_follow_up_coefficient, Decimal::ONE);
/// ```
pub fn compute_unit_coefficient(input: &UnitInput) -> EngineResult<UnitResult> {
    compute_unit_coefficient_with(Regulation::current(), input)
}

/// Computes a unit's screening and follow-up coefficient.
///
/// # Process
///
/// 1. Reject malformed input (period not `YYYY-MM`, empty unit id,
///    criterion without a band) before anything is computed
/// 2. If the salary-basis score is below the floor, return a coefficient
///    of 1 without evaluating any criterion
/// 3. Flag the new-unit exemption (warning only, computation continues)
/// 4. Evaluate every criterion and multiply the unrounded coefficients
/// 5. Calculate the ceiling coefficient and the unit multiplier
/// 6. Clamp the product to `[minimum_coefficient, ceiling]`
///
/// Published coefficients are rounded to 4 decimal places.
pub fn compute_unit_coefficient_with(
    regulation: &Regulation,
    input: &UnitInput,
) -> EngineResult<UnitResult> {
    period_start(&input.period)?;
    if input.unit_id.trim().is_empty() {
        return Err(EngineError::invalid_argument("unit_id", "must not be empty"));
    }

    let bands: Vec<&CriterionBand> = input
        .criteria
        .iter()
        .map(|c| regulation.criterion_band(c.criterion))
        .collect::<EngineResult<_>>()?;

    let settings = regulation.unit_type_settings(input.unit_type);
    let rules = regulation.exception_rules();
    let mut audit_trace = AuditTrace::default();
    let mut warnings = Vec::new();
    let mut exception_note = None;

    if let Some(score) = input
        .salary_basis_score
        .filter(|score| *score < rules.salary_basis_score_floor)
    {
        let unit_multiplier = round_coefficient(settings.base_multiplier());

        audit_trace.record(AuditStep {
            step_number: audit_trace.next_step_number(),
            rule_id: "low_score_exception".to_string(),
            rule_name: "Low Salary-Basis Score Exception".to_string(),
            clause_ref: "18(2)(a)(6)".to_string(),
            input: serde_json::json!({
                "salary_basis_score": score.to_string(),
                "floor": rules.salary_basis_score_floor.to_string()
            }),
            output: serde_json::json!({
                "screening_follow_up_coefficient": "1",
                "criteria_evaluated": false
            }),
            reasoning: format!(
                "Salary-basis score {} is below {}, coefficient fixed at 1",
                score.normalize(),
                rules.salary_basis_score_floor.normalize()
            ),
        });

        warn!(
            unit_id = %input.unit_id,
            period = %input.period,
            salary_basis_score = %score,
            "Low salary-basis score, coefficient fixed at 1"
        );

        return Ok(UnitResult {
            period: input.period.clone(),
            unit_id: input.unit_id.clone(),
            total_population: input.population,
            unit_type: input.unit_type,
            ceiling_coefficient: Decimal::ONE,
            criterion_product: Decimal::ONE,
            screening_follow_up_coefficient: Decimal::ONE,
            unit_multiplier,
            criterion_results: Vec::new(),
            exception_note: Some(LOW_SCORE_EXCEPTION.to_string()),
            warnings,
            audit_trace,
        });
    }

    let is_new_unit = input
        .unit_age_months
        .is_some_and(|age| age <= rules.new_unit_max_age_months)
        && input
            .population_at_six_months
            .is_some_and(|p| p >= rules.new_unit_min_population_at_six_months);

    if is_new_unit {
        exception_note = Some(NEW_UNIT_EXCEPTION.to_string());
        warnings.push(NEW_UNIT_WARNING.to_string());
        audit_trace.warn("new_unit_exemption", NEW_UNIT_EXCEPTION, "low");
        warn!(
            unit_id = %input.unit_id,
            period = %input.period,
            "New unit exemption applies"
        );
    }

    let population_threshold = regulation.population_threshold(input.unit_type);
    let over_capacity = input.population > population_threshold;
    let mut criterion_results = Vec::with_capacity(input.criteria.len());
    let mut criterion_product = Decimal::ONE;

    for (criterion, band) in input.criteria.iter().zip(bands) {
        let evaluation = evaluate_criterion(
            criterion,
            band,
            regulation,
            over_capacity,
            audit_trace.next_step_number(),
        );
        criterion_product *= evaluation.raw_coefficient;
        audit_trace.record(evaluation.audit_step);
        criterion_results.push(evaluation.result);
    }

    let ceiling = calculate_ceiling_coefficient(
        input.population,
        population_threshold,
        settings,
        regulation.coefficient_bounds(),
        input.referral_system_active,
        audit_trace.next_step_number(),
    );
    audit_trace.record(ceiling.audit_step);

    let multiplier = calculate_unit_multiplier(
        settings,
        input.on_call_hours,
        audit_trace.next_step_number(),
    );
    audit_trace.record(multiplier.audit_step);

    let floor = regulation.coefficient_bounds().minimum_coefficient;
    let coefficient = criterion_product.max(floor).min(ceiling.ceiling);

    let mut result = UnitResult {
        period: input.period.clone(),
        unit_id: input.unit_id.clone(),
        total_population: input.population,
        unit_type: input.unit_type,
        ceiling_coefficient: round_coefficient(ceiling.ceiling),
        criterion_product: round_coefficient(criterion_product),
        screening_follow_up_coefficient: round_coefficient(coefficient),
        unit_multiplier: round_coefficient(multiplier.multiplier),
        criterion_results,
        exception_note,
        warnings,
        audit_trace,
    };

    result.audit_trace.record(AuditStep {
        step_number: result.audit_trace.next_step_number(),
        rule_id: "screening_follow_up_coefficient".to_string(),
        rule_name: "Screening and Follow-up Coefficient".to_string(),
        clause_ref: "Annex 2".to_string(),
        input: serde_json::json!({
            "criterion_product": result.criterion_product.to_string(),
            "minimum_coefficient": floor.to_string(),
            "ceiling_coefficient": result.ceiling_coefficient.to_string()
        }),
        output: serde_json::json!({
            "screening_follow_up_coefficient": result.screening_follow_up_coefficient.to_string()
        }),
        reasoning: format!(
            "min(max({}, {}), {}) = {}",
            result.criterion_product,
            floor.normalize(),
            result.ceiling_coefficient,
            result.screening_follow_up_coefficient
        ),
    });

    info!(
        unit_id = %result.unit_id,
        period = %result.period,
        criteria = result.criterion_results.len(),
        criterion_product = %result.criterion_product,
        ceiling = %result.ceiling_coefficient,
        coefficient = %result.screening_follow_up_coefficient,
        "Unit coefficient calculated"
    );

    Ok(result)
}
