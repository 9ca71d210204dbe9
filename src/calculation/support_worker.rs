//! Family health worker (ASÇ) coefficient.
//!
//! A support worker earns a coefficient from two criteria of their own,
//! which is then reconciled against the coefficient of the physician unit
//! they work in.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::{Regulation, SupportWorkerBand};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, SupportWorkerCriterionInput, SupportWorkerCriterionType,
    SupportWorkerInput, SupportWorkerResult, period_start,
};

use super::rounding::round_coefficient;
use super::success_rate::success_percent;

/// The clause reference for support-worker coefficients.
pub const SUPPORT_WORKER_CLAUSE: &str = "7";

/// Share of the unit coefficient a support worker must reach before the
/// unit coefficient can be applied instead of their own.
pub fn unit_coefficient_threshold_ratio() -> Decimal {
    Decimal::new(75, 2)
}

/// Maps a support-worker criterion's success percentage to its coefficient.
///
/// Below the band minimum the fixed low coefficient applies, at or above
/// the maximum the fixed high coefficient applies, and in between the
/// coefficient is interpolated linearly.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::support_worker_criterion_coefficient;
/// use hyp_engine::config::Regulation;
/// use hyp_engine::models::SupportWorkerCriterionType;
/// use rust_decimal::Decimal;
///
/// let band = Regulation::current().support_worker_band(SupportWorkerCriterionType::VitalSigns);
///
/// assert_eq!(support_worker_criterion_coefficient(Decimal::from(40), band), Decimal::new(93, 2));
/// assert_eq!(support_worker_criterion_coefficient(Decimal::from(70), band), Decimal::new(103, 2));
/// assert_eq!(support_worker_criterion_coefficient(Decimal::from(95), band), Decimal::new(106, 2));
/// ```
pub fn support_worker_criterion_coefficient(
    success_percent: Decimal,
    band: &SupportWorkerBand,
) -> Decimal {
    if success_percent < band.minimum_percent {
        return band.below_minimum_coefficient;
    }
    if success_percent >= band.maximum_percent {
        return band.at_maximum_coefficient;
    }

    let position =
        (success_percent - band.minimum_percent) / (band.maximum_percent - band.minimum_percent);
    band.at_minimum_coefficient
        + position * (band.at_maximum_coefficient - band.at_minimum_coefficient)
}

/// Computes a support worker's coefficient with the compiled-in regulation.
///
/// See [`compute_support_worker_coefficient_with`].
pub fn compute_support_worker_coefficient(
    input: &SupportWorkerInput,
) -> EngineResult<SupportWorkerResult> {
    compute_support_worker_coefficient_with(Regulation::current(), input)
}

/// Computes a support worker's coefficient.
///
/// The worker's own coefficient is the product of the vital signs and
/// elderly assessment coefficients. A criterion that is not supplied counts
/// as 1; one supplied more than once takes its last entry.
///
/// The own coefficient is applied when it is below 1, when it is below 75%
/// of the unit coefficient, or when it is at least the unit coefficient.
/// Otherwise the higher unit coefficient is applied.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::compute_support_worker_coefficient;
/// use hyp_engine::models::{
///     SupportWorkerCriterionInput, SupportWorkerCriterionType, SupportWorkerInput,
/// };
/// use rust_decimal::Decimal;
///
/// let input = SupportWorkerInput {
///     unit_id: "ASM-001-01".to_string(),
///     period: "2025-12".to_string(),
///     unit_coefficient: Decimal::new(140, 2),
///     criteria: vec![
///         SupportWorkerCriterionInput {
///             criterion: SupportWorkerCriterionType::VitalSigns,
///             required: 100,
///             done: 90,
///         },
///         SupportWorkerCriterionInput {
///             criterion: SupportWorkerCriterionType::ElderlyAssessment,
///             required: 50,
///             done: 45,
///         },
///     ],
/// };
///
/// let result = compute_support_worker_coefficient(&input).unwrap();
/// assert_eq!(result.support_worker_coefficient, Decimal::new(11978, 4));
/// assert!(result.unit_coefficient_used);
/// assert_eq!(result.final_coefficient, Decimal::new(14, 1));
/// ```
pub fn compute_support_worker_coefficient_with(
    regulation: &Regulation,
    input: &SupportWorkerInput,
) -> EngineResult<SupportWorkerResult> {
    period_start(&input.period)?;
    if input.unit_coefficient < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "unit_coefficient",
            format!("must not be negative, got {}", input.unit_coefficient),
        ));
    }

    let mut audit_trace = AuditTrace::default();

    let vital_signs = criterion_coefficient(
        regulation,
        input,
        SupportWorkerCriterionType::VitalSigns,
        &mut audit_trace,
    );
    let elderly_assessment = criterion_coefficient(
        regulation,
        input,
        SupportWorkerCriterionType::ElderlyAssessment,
        &mut audit_trace,
    );

    let own = vital_signs * elderly_assessment;
    let threshold = input.unit_coefficient * unit_coefficient_threshold_ratio();

    let (final_coefficient, unit_coefficient_used, explanation) = if own < Decimal::ONE {
        (
            own,
            false,
            "Support-worker coefficient below 1, own coefficient applied".to_string(),
        )
    } else if own < threshold {
        (
            own,
            false,
            format!(
                "Support-worker coefficient below 75% of unit coefficient ({:.4}), own coefficient applied",
                round_coefficient(threshold)
            ),
        )
    } else if own >= input.unit_coefficient {
        (
            own,
            false,
            "Support-worker coefficient higher than unit coefficient".to_string(),
        )
    } else {
        (
            input.unit_coefficient,
            true,
            "Unit coefficient higher, unit coefficient applied".to_string(),
        )
    };

    audit_trace.record(AuditStep {
        step_number: audit_trace.next_step_number(),
        rule_id: "support_worker_reconciliation".to_string(),
        rule_name: "Support-Worker Coefficient Reconciliation".to_string(),
        clause_ref: SUPPORT_WORKER_CLAUSE.to_string(),
        input: serde_json::json!({
            "support_worker_coefficient": round_coefficient(own).to_string(),
            "unit_coefficient": input.unit_coefficient.to_string(),
            "threshold": round_coefficient(threshold).to_string()
        }),
        output: serde_json::json!({
            "final_coefficient": round_coefficient(final_coefficient).to_string(),
            "unit_coefficient_used": unit_coefficient_used
        }),
        reasoning: explanation.clone(),
    });

    let result = SupportWorkerResult {
        period: input.period.clone(),
        unit_id: input.unit_id.clone(),
        vital_signs_coefficient: round_coefficient(vital_signs),
        elderly_assessment_coefficient: round_coefficient(elderly_assessment),
        support_worker_coefficient: round_coefficient(own),
        unit_coefficient_used,
        final_coefficient: round_coefficient(final_coefficient),
        explanation,
        audit_trace,
    };

    info!(
        unit_id = %result.unit_id,
        period = %result.period,
        support_worker_coefficient = %result.support_worker_coefficient,
        final_coefficient = %result.final_coefficient,
        unit_coefficient_used = result.unit_coefficient_used,
        "Support-worker coefficient calculated"
    );

    Ok(result)
}

fn criterion_coefficient(
    regulation: &Regulation,
    input: &SupportWorkerInput,
    criterion: SupportWorkerCriterionType,
    audit_trace: &mut AuditTrace,
) -> Decimal {
    let supplied: Option<&SupportWorkerCriterionInput> =
        input.criteria.iter().rfind(|c| c.criterion == criterion);

    let Some(supplied) = supplied else {
        debug!(criterion = %criterion, "Criterion not supplied, coefficient 1");
        return Decimal::ONE;
    };

    let band = regulation.support_worker_band(criterion);
    let success = success_percent(supplied.done, supplied.required);
    let coefficient = support_worker_criterion_coefficient(success, band);

    debug!(
        criterion = %criterion,
        success = %success.round_dp(2),
        coefficient = %coefficient,
        "Evaluated support-worker criterion"
    );

    audit_trace.record(AuditStep {
        step_number: audit_trace.next_step_number(),
        rule_id: "support_worker_criterion".to_string(),
        rule_name: "Support-Worker Criterion Coefficient".to_string(),
        clause_ref: SUPPORT_WORKER_CLAUSE.to_string(),
        input: serde_json::json!({
            "criterion": criterion.to_string(),
            "required": supplied.required,
            "done": supplied.done,
            "minimum_percent": band.minimum_percent.to_string(),
            "maximum_percent": band.maximum_percent.to_string()
        }),
        output: serde_json::json!({
            "success_percent": success.round_dp(2).to_string(),
            "coefficient": round_coefficient(coefficient).to_string()
        }),
        reasoning: format!(
            "{}: {}% against band {}-{}% gives coefficient {}",
            criterion,
            success.round_dp(2),
            band.minimum_percent.normalize(),
            band.maximum_percent.normalize(),
            round_coefficient(coefficient)
        ),
    });

    coefficient
}
