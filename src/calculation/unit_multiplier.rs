//! Unit multiplier calculation.
//!
//! Integrated and mandatory low-population units earn a higher multiplier
//! in exchange for monthly on-call duty; every complete block of missed
//! on-call hours deducts a fixed share of it.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::UnitTypeSettings;
use crate::models::AuditStep;

/// The result of a unit multiplier calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct UnitMultiplierResult {
    /// The unrounded unit multiplier.
    pub multiplier: Decimal,
    /// Number of complete on-call shortfall blocks deducted.
    pub shortfall_blocks: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the unit multiplier for a period.
///
/// Standard units get their fixed multiplier and detention facility units
/// get 1. On-call units get `base × (1 − blocks × penalty)`, where `blocks`
/// is the number of complete shortfall blocks below the monthly
/// requirement. Missing on-call hours count as none logged. A zero block
/// size, which a validated regulation never carries, deducts nothing.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::calculate_unit_multiplier;
/// use hyp_engine::config::Regulation;
/// use hyp_engine::models::UnitType;
/// use rust_decimal::Decimal;
///
/// let settings = Regulation::current().unit_type_settings(UnitType::Integrated);
///
/// // 80 of 96 hours: two 8-hour blocks missed, 16% off 1.65.
/// let result = calculate_unit_multiplier(settings, Some(80), 1);
/// assert_eq!(result.shortfall_blocks, 2);
/// assert_eq!(result.multiplier, Decimal::new(1386, 3));
/// ```
pub fn calculate_unit_multiplier(
    settings: &UnitTypeSettings,
    on_call_hours: Option<u32>,
    step_number: u32,
) -> UnitMultiplierResult {
    let (multiplier, shortfall_blocks, reasoning) = match settings {
        UnitTypeSettings::Standard {
            base_multiplier, ..
        } => (
            *base_multiplier,
            0,
            format!("Fixed unit multiplier {}", base_multiplier.normalize()),
        ),
        UnitTypeSettings::DetaineeFacility { .. } => (
            Decimal::ONE,
            0,
            "Detention facility units have no unit multiplier".to_string(),
        ),
        UnitTypeSettings::OnCall {
            base_multiplier,
            required_monthly_hours,
            shortfall_block_hours,
            penalty_per_block,
            ..
        } => {
            let logged = on_call_hours.unwrap_or(0);
            if logged >= *required_monthly_hours {
                (
                    *base_multiplier,
                    0,
                    format!(
                        "{} of {} on-call hours logged, full multiplier {}",
                        logged,
                        required_monthly_hours,
                        base_multiplier.normalize()
                    ),
                )
            } else {
                let shortfall = required_monthly_hours - logged;
                let blocks = shortfall.checked_div(*shortfall_block_hours).unwrap_or(0);
                let deduction = Decimal::from(blocks) * penalty_per_block;
                let multiplier = base_multiplier * (Decimal::ONE - deduction);
                (
                    multiplier,
                    blocks,
                    format!(
                        "{} of {} on-call hours logged: {} complete {}-hour blocks missed, {} × (1 − {}) = {}",
                        logged,
                        required_monthly_hours,
                        blocks,
                        shortfall_block_hours,
                        base_multiplier.normalize(),
                        deduction.normalize(),
                        multiplier.normalize()
                    ),
                )
            }
        }
    };

    debug!(multiplier = %multiplier, shortfall_blocks, "Calculated unit multiplier");

    let audit_step = AuditStep {
        step_number,
        rule_id: "unit_multiplier".to_string(),
        rule_name: "Unit Multiplier".to_string(),
        clause_ref: "Unit settings".to_string(),
        input: serde_json::json!({
            "on_call_hours": on_call_hours,
            "base_multiplier": settings.base_multiplier().to_string()
        }),
        output: serde_json::json!({
            "unit_multiplier": multiplier.round_dp(4).to_string(),
            "shortfall_blocks": shortfall_blocks
        }),
        reasoning,
    };

    UnitMultiplierResult {
        multiplier,
        shortfall_blocks,
        audit_step,
    }
}
