//! Family health worker (ASÇ) models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditTrace;

/// The two criteria measured for family health workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportWorkerCriterionType {
    /// Vital signs check.
    VitalSigns,
    /// Elderly assessment.
    ElderlyAssessment,
}

impl fmt::Display for SupportWorkerCriterionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SupportWorkerCriterionType::VitalSigns => "vital_signs",
            SupportWorkerCriterionType::ElderlyAssessment => "elderly_assessment",
        })
    }
}

/// Performance data for one support-worker criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportWorkerCriterionInput {
    /// The criterion being measured.
    pub criterion: SupportWorkerCriterionType,
    /// Required procedures.
    pub required: u32,
    /// Performed procedures.
    pub done: u32,
}

/// Input for a support-worker coefficient calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportWorkerInput {
    /// Identifier of the unit the worker belongs to.
    pub unit_id: String,
    /// Calculation period in `YYYY-MM` form.
    pub period: String,
    /// The physician unit's screening and follow-up coefficient.
    pub unit_coefficient: Decimal,
    /// Per-criterion performance data.
    #[serde(default)]
    pub criteria: Vec<SupportWorkerCriterionInput>,
}

/// The computed support-worker coefficient for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportWorkerResult {
    /// The calculation period.
    pub period: String,
    /// Identifier of the unit.
    pub unit_id: String,
    /// Vital signs coefficient (4 dp).
    pub vital_signs_coefficient: Decimal,
    /// Elderly assessment coefficient (4 dp).
    pub elderly_assessment_coefficient: Decimal,
    /// Product of the two criterion coefficients (4 dp).
    pub support_worker_coefficient: Decimal,
    /// Whether the unit's coefficient was selected over the worker's own.
    pub unit_coefficient_used: bool,
    /// The coefficient applied to the worker (4 dp).
    pub final_coefficient: Decimal,
    /// Explanation of the reconciliation branch taken.
    pub explanation: String,
    /// Audit trace of every rule applied.
    pub audit_trace: AuditTrace,
}
