//! Family medicine unit models.
//!
//! This module defines the unit categories recognised by the directive and
//! the input and result records of the unit coefficient calculation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, CriterionInput, CriterionResult};

/// The category of a family medicine unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// A regular family medicine unit.
    Normal,
    /// An integrated unit with mandatory on-call duty.
    Integrated,
    /// A unit kept open in a mandatory low-population area.
    MandatoryLowPopulation,
    /// A unit serving a detention facility.
    DetaineeFacility,
}

impl UnitType {
    /// Returns the snake_case code used in serialized records.
    pub fn code(&self) -> &'static str {
        match self {
            UnitType::Normal => "normal",
            UnitType::Integrated => "integrated",
            UnitType::MandatoryLowPopulation => "mandatory_low_population",
            UnitType::DetaineeFacility => "detainee_facility",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Input for a unit coefficient calculation for one period.
///
/// # Example
///
/// ```
/// use hyp_engine::models::{UnitInput, UnitType};
///
/// let input: UnitInput = serde_json::from_str(r#"{
///     "unit_id": "ASM-001-01",
///     "period": "2025-12",
///     "population": 3500,
///     "unit_type": "normal",
///     "criteria": [
///         {"criterion": "dm_screening", "required": 100, "done": 85, "carry_in": 10}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(input.unit_type, UnitType::Normal);
/// assert!(!input.referral_system_active);
/// assert_eq!(input.criteria.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInput {
    /// Identifier of the unit.
    pub unit_id: String,
    /// Calculation period in `YYYY-MM` form.
    pub period: String,
    /// Registered population of the unit.
    pub population: u32,
    /// The unit category.
    pub unit_type: UnitType,
    /// Salary-basis intermediate score, when known.
    #[serde(default)]
    pub salary_basis_score: Option<Decimal>,
    /// Age of the unit in months.
    #[serde(default)]
    pub unit_age_months: Option<u32>,
    /// Population the unit had reached by its sixth month.
    #[serde(default)]
    pub population_at_six_months: Option<u32>,
    /// On-call hours logged during the period.
    #[serde(default)]
    pub on_call_hours: Option<u32>,
    /// Whether the referral system is active in the unit's area.
    #[serde(default)]
    pub referral_system_active: bool,
    /// Per-criterion performance data.
    #[serde(default)]
    pub criteria: Vec<CriterionInput>,
}

impl UnitInput {
    /// Creates an input with no optional fields and no criteria.
    pub fn new(
        unit_id: impl Into<String>,
        period: impl Into<String>,
        population: u32,
        unit_type: UnitType,
    ) -> Self {
        Self {
            unit_id: unit_id.into(),
            period: period.into(),
            population,
            unit_type,
            salary_basis_score: None,
            unit_age_months: None,
            population_at_six_months: None,
            on_call_hours: None,
            referral_system_active: false,
            criteria: Vec::new(),
        }
    }
}

/// The computed coefficients of a unit for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitResult {
    /// The calculation period.
    pub period: String,
    /// Identifier of the unit.
    pub unit_id: String,
    /// Registered population.
    pub total_population: u32,
    /// The unit category.
    pub unit_type: UnitType,
    /// Population-driven cap on the final coefficient (4 dp).
    pub ceiling_coefficient: Decimal,
    /// Product of all criterion coefficients (4 dp).
    pub criterion_product: Decimal,
    /// The final screening and follow-up coefficient (4 dp).
    pub screening_follow_up_coefficient: Decimal,
    /// The unit-type multiplier after on-call deductions (4 dp).
    pub unit_multiplier: Decimal,
    /// Per-criterion results, in input order.
    pub criterion_results: Vec<CriterionResult>,
    /// Exception rule that applied to the unit, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_note: Option<String>,
    /// Warnings raised during the calculation.
    pub warnings: Vec<String>,
    /// Audit trace of every rule applied.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_serialization() {
        assert_eq!(
            serde_json::to_string(&UnitType::MandatoryLowPopulation).unwrap(),
            "\"mandatory_low_population\""
        );
        let unit_type: UnitType = serde_json::from_str("\"detainee_facility\"").unwrap();
        assert_eq!(unit_type, UnitType::DetaineeFacility);
    }

    #[test]
    fn test_unknown_unit_type_is_rejected() {
        let result: Result<UnitType, _> = serde_json::from_str("\"mobile\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unit_input_optional_fields_default() {
        let input: UnitInput = serde_json::from_str(
            r#"{"unit_id": "u1", "period": "2025-06", "population": 2000, "unit_type": "integrated"}"#,
        )
        .unwrap();
        assert_eq!(input.salary_basis_score, None);
        assert_eq!(input.on_call_hours, None);
        assert!(input.criteria.is_empty());
    }

    #[test]
    fn test_unit_input_new_matches_deserialized_defaults() {
        let built = UnitInput::new("u1", "2025-06", 2000, UnitType::Integrated);
        let parsed: UnitInput = serde_json::from_str(
            r#"{"unit_id": "u1", "period": "2025-06", "population": 2000, "unit_type": "integrated"}"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }
}
