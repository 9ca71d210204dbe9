//! Criterion models.
//!
//! This module defines the closed set of HYP criteria, the status colours a
//! criterion result can carry, and the per-criterion input and result records.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A measurable screening, follow-up or outcome target.
///
/// The set is closed: the directive defines exactly these nineteen criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionType {
    /// Hypertension screening.
    HtScreening,
    /// Hypertension follow-up.
    HtFollowUp,
    /// Hypertension outcome.
    HtOutcome,
    /// Diabetes screening.
    DmScreening,
    /// Diabetes follow-up.
    DmFollowUp,
    /// Diabetes outcome.
    DmOutcome,
    /// Obesity screening.
    ObesityScreening,
    /// Obesity follow-up.
    ObesityFollowUp,
    /// Obesity outcome.
    ObesityOutcome,
    /// Cardiovascular risk screening.
    CvrScreening,
    /// Cardiovascular risk follow-up.
    CvrFollowUp,
    /// Cardiovascular risk outcome.
    CvrOutcome,
    /// Elderly health screening.
    ElderlyScreening,
    /// Elderly health follow-up.
    ElderlyFollowUp,
    /// Elderly health outcome.
    ElderlyOutcome,
    /// Cervical cancer screening.
    CervicalScreening,
    /// Colorectal cancer screening.
    ColorectalScreening,
    /// Breast cancer screening (mammography).
    BreastScreening,
    /// Process management.
    ProcessManagement,
}

impl CriterionType {
    /// Every criterion, in the order the directive lists them.
    pub const ALL: [CriterionType; 19] = [
        CriterionType::HtScreening,
        CriterionType::HtFollowUp,
        CriterionType::HtOutcome,
        CriterionType::DmScreening,
        CriterionType::DmFollowUp,
        CriterionType::DmOutcome,
        CriterionType::ObesityScreening,
        CriterionType::ObesityFollowUp,
        CriterionType::ObesityOutcome,
        CriterionType::CvrScreening,
        CriterionType::CvrFollowUp,
        CriterionType::CvrOutcome,
        CriterionType::ElderlyScreening,
        CriterionType::ElderlyFollowUp,
        CriterionType::ElderlyOutcome,
        CriterionType::CervicalScreening,
        CriterionType::ColorectalScreening,
        CriterionType::BreastScreening,
        CriterionType::ProcessManagement,
    ];

    /// Returns the snake_case code used in serialized records.
    pub fn code(&self) -> &'static str {
        match self {
            CriterionType::HtScreening => "ht_screening",
            CriterionType::HtFollowUp => "ht_follow_up",
            CriterionType::HtOutcome => "ht_outcome",
            CriterionType::DmScreening => "dm_screening",
            CriterionType::DmFollowUp => "dm_follow_up",
            CriterionType::DmOutcome => "dm_outcome",
            CriterionType::ObesityScreening => "obesity_screening",
            CriterionType::ObesityFollowUp => "obesity_follow_up",
            CriterionType::ObesityOutcome => "obesity_outcome",
            CriterionType::CvrScreening => "cvr_screening",
            CriterionType::CvrFollowUp => "cvr_follow_up",
            CriterionType::CvrOutcome => "cvr_outcome",
            CriterionType::ElderlyScreening => "elderly_screening",
            CriterionType::ElderlyFollowUp => "elderly_follow_up",
            CriterionType::ElderlyOutcome => "elderly_outcome",
            CriterionType::CervicalScreening => "cervical_screening",
            CriterionType::ColorectalScreening => "colorectal_screening",
            CriterionType::BreastScreening => "breast_screening",
            CriterionType::ProcessManagement => "process_management",
        }
    }
}

impl fmt::Display for CriterionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Coarse classification of where a success percentage falls relative to
/// its criterion band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    /// Below the band minimum.
    Red,
    /// Within the band.
    Green,
    /// Above the band maximum but at most 100%.
    Yellow,
    /// Above 100%; the surplus carries into the next period.
    Orange,
}

/// Performance data for one criterion in one period.
///
/// # Example
///
/// ```
/// use hyp_engine::models::{CriterionInput, CriterionType};
///
/// let input: CriterionInput = serde_json::from_str(
///     r#"{"criterion": "dm_screening", "required": 100, "done": 85}"#,
/// ).unwrap();
/// assert_eq!(input.criterion, CriterionType::DmScreening);
/// assert_eq!(input.carry_in, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionInput {
    /// The criterion being measured.
    pub criterion: CriterionType,
    /// Number of procedures the target population requires.
    pub required: u32,
    /// Number of procedures actually performed.
    pub done: u32,
    /// Surplus carried in from the previous period.
    #[serde(default)]
    pub carry_in: u32,
}

impl CriterionInput {
    /// Creates an input with no carry-in.
    pub fn new(criterion: CriterionType, required: u32, done: u32) -> Self {
        Self {
            criterion,
            required,
            done,
            carry_in: 0,
        }
    }

    /// Sets the carry-in from the previous period.
    pub fn with_carry_in(mut self, carry_in: u32) -> Self {
        self.carry_in = carry_in;
        self
    }
}

/// The evaluated outcome of a single criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// The criterion that was evaluated.
    pub criterion: CriterionType,
    /// Required procedures.
    pub required: u32,
    /// Performed procedures.
    pub done: u32,
    /// Carry-in supplied from the previous period.
    pub carry_in: u32,
    /// Success percentage without carry-in (2 dp).
    pub success_percent: Decimal,
    /// Success percentage after the carry-in eligibility rule (2 dp).
    pub success_percent_with_carry: Decimal,
    /// The criterion coefficient (4 dp).
    pub coefficient: Decimal,
    /// Procedures still missing to reach the requirement.
    pub remaining: u32,
    /// Surplus carried into the next period.
    pub carry_out: u32,
    /// Status colour of the carry-adjusted success.
    pub status: StatusColor,
    /// Short explanation of the status.
    pub explanation: String,
}
