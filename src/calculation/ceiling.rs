//! Ceiling coefficient calculation.
//!
//! The ceiling coefficient caps a unit's final coefficient by how far its
//! population falls short of the unit-type maximum (Article 7(5): the
//! coefficient may not exceed the ratio of the maximum population to the
//! unit's current population).

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{CoefficientBounds, UnitTypeSettings};
use crate::models::AuditStep;

/// The clause reference for the ceiling coefficient.
pub const CEILING_COEFFICIENT_CLAUSE: &str = "7(5)";

/// The result of a ceiling calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct CeilingResult {
    /// The unrounded ceiling coefficient.
    pub ceiling: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the ceiling coefficient of a unit.
///
/// Detention facility units above the upper tier threshold get the upper
/// tier ceiling, and those within the lower tier get the lower tier ceiling.
/// Every other case uses the standard formula: 1.0 when the population
/// reaches `max_population`, otherwise `max_population / population` capped
/// at 1.50 (2.00 inside the referral system). An empty unit gets the cap.
///
/// `max_population` is the unit's over-capacity threshold as returned by
/// [`Regulation::population_threshold`](crate::config::Regulation::population_threshold);
/// for detention facilities that is the normal unit's maximum.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::calculate_ceiling_coefficient;
/// use hyp_engine::config::Regulation;
/// use hyp_engine::models::UnitType;
/// use rust_decimal::Decimal;
///
/// let regulation = Regulation::current();
/// let result = calculate_ceiling_coefficient(
///     3500,
///     regulation.population_threshold(UnitType::Normal),
///     regulation.unit_type_settings(UnitType::Normal),
///     regulation.coefficient_bounds(),
///     false,
///     1,
/// );
/// assert_eq!(result.ceiling.round_dp(4), Decimal::new(11429, 4));
/// ```
pub fn calculate_ceiling_coefficient(
    population: u32,
    max_population: u32,
    settings: &UnitTypeSettings,
    bounds: &CoefficientBounds,
    referral_system_active: bool,
    step_number: u32,
) -> CeilingResult {
    if let UnitTypeSettings::DetaineeFacility {
        upper_tier_threshold,
        lower_tier_threshold,
        upper_tier_ceiling,
        lower_tier_ceiling,
        ..
    } = settings
    {
        let tier = if population > *upper_tier_threshold {
            Some((*upper_tier_ceiling, format!("population {} > {}", population, upper_tier_threshold)))
        } else if population >= *lower_tier_threshold {
            Some((
                *lower_tier_ceiling,
                format!(
                    "population {} within {}-{}",
                    population, lower_tier_threshold, upper_tier_threshold
                ),
            ))
        } else {
            None
        };

        if let Some((ceiling, reason)) = tier {
            return CeilingResult {
                ceiling,
                audit_step: audit_step(
                    step_number,
                    population,
                    max_population,
                    referral_system_active,
                    ceiling,
                    "detainee_tier",
                    format!("Detention facility tier: {}, ceiling {}", reason, ceiling),
                ),
            };
        }
    }

    if population >= max_population {
        return CeilingResult {
            ceiling: Decimal::ONE,
            audit_step: audit_step(
                step_number,
                population,
                max_population,
                referral_system_active,
                Decimal::ONE,
                "at_capacity",
                format!(
                    "Population {} reaches maximum {}, ceiling 1",
                    population, max_population
                ),
            ),
        };
    }

    let cap = if referral_system_active {
        bounds.maximum_coefficient_with_referral
    } else {
        bounds.maximum_coefficient
    };

    let (ceiling, reasoning) = if population == 0 {
        (cap, format!("Empty unit, ceiling is the cap {}", cap.normalize()))
    } else {
        let ratio = Decimal::from(max_population) / Decimal::from(population);
        let ceiling = ratio.min(cap);
        (
            ceiling,
            format!(
                "min({} / {}, {}) = {}",
                max_population,
                population,
                cap.normalize(),
                ceiling.round_dp(4)
            ),
        )
    };

    debug!(population, max_population, ceiling = %ceiling, "Calculated ceiling coefficient");

    CeilingResult {
        ceiling,
        audit_step: audit_step(
            step_number,
            population,
            max_population,
            referral_system_active,
            ceiling,
            "population_ratio",
            reasoning,
        ),
    }
}

fn audit_step(
    step_number: u32,
    population: u32,
    max_population: u32,
    referral_system_active: bool,
    ceiling: Decimal,
    basis: &str,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "ceiling_coefficient".to_string(),
        rule_name: "Ceiling Coefficient".to_string(),
        clause_ref: CEILING_COEFFICIENT_CLAUSE.to_string(),
        input: serde_json::json!({
            "population": population,
            "max_population": max_population,
            "referral_system_active": referral_system_active
        }),
        output: serde_json::json!({
            "ceiling_coefficient": ceiling.round_dp(4).to_string(),
            "basis": basis
        }),
        reasoning,
    }
}
