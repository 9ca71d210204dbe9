//! Regulation table types.
//!
//! This module contains the strongly-typed regulation tables of the
//! screening and follow-up directive. They are deserialized from YAML
//! regulation files or built from the compiled-in defaults.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CriterionType, SupportWorkerCriterionType, UnitType};

/// Metadata identifying a regulation version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationMetadata {
    /// Human-readable name of the directive.
    pub name: String,
    /// Date from which these tables apply.
    pub effective_date: NaiveDate,
    /// Reference to the official text.
    pub source: String,
}

/// Minimum and maximum success percentages of a criterion (Annex 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionBand {
    /// Success below this percentage is penalised.
    pub minimum_percent: Decimal,
    /// Success above this percentage is flagged as over-performance.
    pub maximum_percent: Decimal,
}

impl CriterionBand {
    /// Creates a band from whole percentages.
    pub fn new(minimum_percent: u32, maximum_percent: u32) -> Self {
        Self {
            minimum_percent: Decimal::from(minimum_percent),
            maximum_percent: Decimal::from(maximum_percent),
        }
    }
}

/// Coefficient bounds of Annex 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientBounds {
    /// Floor of the unit's screening and follow-up coefficient.
    pub minimum_coefficient: Decimal,
    /// Ceiling cap for units outside the referral system.
    pub maximum_coefficient: Decimal,
    /// Ceiling cap for units inside the referral system.
    pub maximum_coefficient_with_referral: Decimal,
    /// Criterion coefficient when nothing was done.
    pub nothing_done_coefficient: Decimal,
    /// Lower end of the below-minimum criterion coefficient range.
    pub below_minimum_coefficient_min: Decimal,
    /// Published upper end of the below-minimum criterion coefficient range.
    pub below_minimum_coefficient_max: Decimal,
    /// Upper clamp of an interpolated below-minimum coefficient. Red results
    /// stay strictly below 1 however close they get to the band minimum.
    pub below_minimum_coefficient_cap: Decimal,
}

/// Population and multiplier settings for a unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitTypeSettings {
    /// A unit with a fixed multiplier and no on-call duty.
    Standard {
        /// Population at which the ceiling coefficient drops to 1.
        max_population: u32,
        /// The unit multiplier.
        base_multiplier: Decimal,
    },
    /// A unit whose multiplier depends on logged on-call hours.
    OnCall {
        /// Population at which the ceiling coefficient drops to 1.
        max_population: u32,
        /// The multiplier when the on-call requirement is met.
        base_multiplier: Decimal,
        /// Monthly on-call hours required.
        required_monthly_hours: u32,
        /// Size of a shortfall block in hours.
        shortfall_block_hours: u32,
        /// Fractional deduction per complete shortfall block.
        penalty_per_block: Decimal,
    },
    /// A detention facility unit with population-tiered ceilings.
    DetaineeFacility {
        /// Population used by the standard ceiling formula below the tiers.
        max_population: u32,
        /// Populations strictly above this get the upper-tier ceiling.
        upper_tier_threshold: u32,
        /// Populations from this up to the upper threshold get the lower-tier ceiling.
        lower_tier_threshold: u32,
        /// Ceiling above the upper threshold.
        upper_tier_ceiling: Decimal,
        /// Ceiling within the lower tier.
        lower_tier_ceiling: Decimal,
    },
}

impl UnitTypeSettings {
    /// Returns the population at which the ceiling coefficient drops to 1.
    pub fn max_population(&self) -> u32 {
        match self {
            UnitTypeSettings::Standard { max_population, .. }
            | UnitTypeSettings::OnCall { max_population, .. }
            | UnitTypeSettings::DetaineeFacility { max_population, .. } => *max_population,
        }
    }

    /// Returns the multiplier before any on-call deduction.
    pub fn base_multiplier(&self) -> Decimal {
        match self {
            UnitTypeSettings::Standard { base_multiplier, .. }
            | UnitTypeSettings::OnCall { base_multiplier, .. } => *base_multiplier,
            UnitTypeSettings::DetaineeFacility { .. } => Decimal::ONE,
        }
    }
}

/// Settings for every unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTypeTable {
    /// Settings for normal units.
    pub normal: UnitTypeSettings,
    /// Settings for integrated units.
    pub integrated: UnitTypeSettings,
    /// Settings for mandatory low-population units.
    pub mandatory_low_population: UnitTypeSettings,
    /// Settings for detention facility units.
    pub detainee_facility: UnitTypeSettings,
}

impl UnitTypeTable {
    /// Returns the settings for a unit category.
    pub fn get(&self, unit_type: UnitType) -> &UnitTypeSettings {
        match unit_type {
            UnitType::Normal => &self.normal,
            UnitType::Integrated => &self.integrated,
            UnitType::MandatoryLowPopulation => &self.mandatory_low_population,
            UnitType::DetaineeFacility => &self.detainee_facility,
        }
    }

    /// Returns the population above which a unit counts as over capacity.
    ///
    /// Detention facilities are measured against the normal unit's maximum;
    /// their own `max_population` only sizes the tier table.
    pub fn population_threshold(&self, unit_type: UnitType) -> u32 {
        match unit_type {
            UnitType::DetaineeFacility => self.normal.max_population(),
            other => self.get(other).max_population(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (UnitType, &UnitTypeSettings)> {
        [
            (UnitType::Normal, &self.normal),
            (UnitType::Integrated, &self.integrated),
            (UnitType::MandatoryLowPopulation, &self.mandatory_low_population),
            (UnitType::DetaineeFacility, &self.detainee_facility),
        ]
        .into_iter()
    }
}

/// Success band and coefficients of a support-worker criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportWorkerBand {
    /// Minimum success percentage.
    pub minimum_percent: Decimal,
    /// Maximum success percentage.
    pub maximum_percent: Decimal,
    /// Coefficient below the minimum.
    pub below_minimum_coefficient: Decimal,
    /// Coefficient at the minimum.
    pub at_minimum_coefficient: Decimal,
    /// Coefficient at or above the maximum.
    pub at_maximum_coefficient: Decimal,
}

/// Bands for both support-worker criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportWorkerBands {
    /// Vital signs check band.
    pub vital_signs: SupportWorkerBand,
    /// Elderly assessment band.
    pub elderly_assessment: SupportWorkerBand,
}

impl SupportWorkerBands {
    /// Returns the band for a support-worker criterion.
    pub fn get(&self, criterion: SupportWorkerCriterionType) -> &SupportWorkerBand {
        match criterion {
            SupportWorkerCriterionType::VitalSigns => &self.vital_signs,
            SupportWorkerCriterionType::ElderlyAssessment => &self.elderly_assessment,
        }
    }
}

/// Wage rates of the payment regulation (Article 18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRates {
    /// Points paid at the fixed rate.
    pub base_points: Decimal,
    /// Fixed-rate share of the ceiling wage for family medicine specialists.
    pub family_medicine_specialist_rate: Decimal,
    /// Fixed-rate share of the ceiling wage for everyone else.
    pub standard_rate: Decimal,
    /// Share of the ceiling wage paid per point above the base points.
    pub per_point_rate: Decimal,
}

/// Thresholds of the unit exception rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRules {
    /// Salary-basis scores below this force the coefficient to 1.
    pub salary_basis_score_floor: Decimal,
    /// Units up to this age in months may claim the new-unit exemption.
    pub new_unit_max_age_months: u32,
    /// Population required by month six for the new-unit exemption.
    pub new_unit_min_population_at_six_months: u32,
}

/// Carry-over eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryOverRules {
    /// Share of the requirement that must be done in-period to use carry-in.
    pub minimum_done_ratio: Decimal,
}

/// A complete regulation version.
///
/// This struct aggregates every table the calculations read. Fields are
/// private; the tables are read through accessors and never mutated. Every
/// way of obtaining a `Regulation` from outside the crate, including
/// deserialization, runs [`Regulation::validate`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegulationTables")]
pub struct Regulation {
    metadata: RegulationMetadata,
    criterion_bands: HashMap<CriterionType, CriterionBand>,
    coefficient_bounds: CoefficientBounds,
    unit_types: UnitTypeTable,
    support_worker_bands: SupportWorkerBands,
    salary_rates: SalaryRates,
    exception_rules: ExceptionRules,
    carry_over_rules: CarryOverRules,
}

/// Unvalidated regulation tables as they appear in a regulation file.
#[derive(Debug, Deserialize)]
pub(super) struct RegulationTables {
    pub(super) metadata: RegulationMetadata,
    pub(super) criterion_bands: HashMap<CriterionType, CriterionBand>,
    pub(super) coefficient_bounds: CoefficientBounds,
    pub(super) unit_types: UnitTypeTable,
    pub(super) support_worker_bands: SupportWorkerBands,
    pub(super) salary_rates: SalaryRates,
    pub(super) exception_rules: ExceptionRules,
    pub(super) carry_over_rules: CarryOverRules,
}

impl TryFrom<RegulationTables> for Regulation {
    type Error = EngineError;

    fn try_from(tables: RegulationTables) -> EngineResult<Self> {
        let regulation = Self::from_tables_unchecked(tables);
        regulation.validate()?;
        Ok(regulation)
    }
}

impl Regulation {
    /// Creates a regulation from its component tables.
    ///
    /// Returns `InvalidRegulation` if the tables fail [`Regulation::validate`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        metadata: RegulationMetadata,
        criterion_bands: HashMap<CriterionType, CriterionBand>,
        coefficient_bounds: CoefficientBounds,
        unit_types: UnitTypeTable,
        support_worker_bands: SupportWorkerBands,
        salary_rates: SalaryRates,
        exception_rules: ExceptionRules,
        carry_over_rules: CarryOverRules,
    ) -> EngineResult<Self> {
        Self::try_from(RegulationTables {
            metadata,
            criterion_bands,
            coefficient_bounds,
            unit_types,
            support_worker_bands,
            salary_rates,
            exception_rules,
            carry_over_rules,
        })
    }

    /// Builds a regulation without validating it. Only the compiled-in
    /// tables, which are covered by tests, go through here directly.
    pub(super) fn from_tables_unchecked(tables: RegulationTables) -> Self {
        Self {
            metadata: tables.metadata,
            criterion_bands: tables.criterion_bands,
            coefficient_bounds: tables.coefficient_bounds,
            unit_types: tables.unit_types,
            support_worker_bands: tables.support_worker_bands,
            salary_rates: tables.salary_rates,
            exception_rules: tables.exception_rules,
            carry_over_rules: tables.carry_over_rules,
        }
    }

    /// Returns the regulation metadata.
    pub fn metadata(&self) -> &RegulationMetadata {
        &self.metadata
    }

    /// Returns all criterion bands.
    pub fn criterion_bands(&self) -> &HashMap<CriterionType, CriterionBand> {
        &self.criterion_bands
    }

    /// Returns the success band of a criterion.
    pub fn criterion_band(&self, criterion: CriterionType) -> EngineResult<&CriterionBand> {
        self.criterion_bands
            .get(&criterion)
            .ok_or(EngineError::CriterionBandNotFound { criterion })
    }

    /// Returns the coefficient bounds.
    pub fn coefficient_bounds(&self) -> &CoefficientBounds {
        &self.coefficient_bounds
    }

    /// Returns the settings table for all unit categories.
    pub fn unit_types(&self) -> &UnitTypeTable {
        &self.unit_types
    }

    /// Returns the settings of a unit category.
    pub fn unit_type_settings(&self, unit_type: UnitType) -> &UnitTypeSettings {
        self.unit_types.get(unit_type)
    }

    /// Returns the over-capacity population threshold of a unit category.
    pub fn population_threshold(&self, unit_type: UnitType) -> u32 {
        self.unit_types.population_threshold(unit_type)
    }

    /// Returns the band of a support-worker criterion.
    pub fn support_worker_band(&self, criterion: SupportWorkerCriterionType) -> &SupportWorkerBand {
        self.support_worker_bands.get(criterion)
    }

    /// Returns both support-worker bands.
    pub fn support_worker_bands(&self) -> &SupportWorkerBands {
        &self.support_worker_bands
    }

    /// Returns the wage rates.
    pub fn salary_rates(&self) -> &SalaryRates {
        &self.salary_rates
    }

    /// Returns the exception rule thresholds.
    pub fn exception_rules(&self) -> &ExceptionRules {
        &self.exception_rules
    }

    /// Returns the carry-over rules.
    pub fn carry_over_rules(&self) -> &CarryOverRules {
        &self.carry_over_rules
    }

    /// Checks the tables for internal consistency.
    ///
    /// Returns `InvalidRegulation` if a criterion has no band, a band is
    /// out of order, a population threshold or shortfall block is zero, or
    /// a support-worker band is empty.
    pub fn validate(&self) -> EngineResult<()> {
        let hundred = Decimal::ONE_HUNDRED;

        for criterion in CriterionType::ALL {
            let band = self
                .criterion_bands
                .get(&criterion)
                .ok_or_else(|| invalid(format!("missing band for criterion '{}'", criterion)))?;
            if band.minimum_percent < Decimal::ZERO
                || band.minimum_percent > band.maximum_percent
                || band.maximum_percent > hundred
            {
                return Err(invalid(format!(
                    "band for '{}' must satisfy 0 <= {} <= {} <= 100",
                    criterion, band.minimum_percent, band.maximum_percent
                )));
            }
        }

        let bounds = &self.coefficient_bounds;
        if bounds.minimum_coefficient > bounds.maximum_coefficient
            || bounds.maximum_coefficient > bounds.maximum_coefficient_with_referral
        {
            return Err(invalid(
                "coefficient bounds must satisfy minimum <= maximum <= maximum_with_referral",
            ));
        }
        if bounds.below_minimum_coefficient_min > bounds.below_minimum_coefficient_cap
            || bounds.below_minimum_coefficient_cap >= Decimal::ONE
        {
            return Err(invalid(
                "below-minimum coefficients must satisfy min <= cap < 1",
            ));
        }

        for (unit_type, settings) in self.unit_types.iter() {
            if settings.max_population() == 0 {
                return Err(invalid(format!("max_population of '{}' must be positive", unit_type)));
            }
            match settings {
                UnitTypeSettings::OnCall {
                    shortfall_block_hours: 0,
                    ..
                } => {
                    return Err(invalid(format!(
                        "shortfall_block_hours of '{}' must be positive",
                        unit_type
                    )));
                }
                UnitTypeSettings::DetaineeFacility {
                    upper_tier_threshold,
                    lower_tier_threshold,
                    ..
                } if lower_tier_threshold > upper_tier_threshold => {
                    return Err(invalid(format!(
                        "tier thresholds of '{}' are out of order",
                        unit_type
                    )));
                }
                _ => {}
            }
        }

        for (name, band) in [
            ("vital_signs", &self.support_worker_bands.vital_signs),
            ("elderly_assessment", &self.support_worker_bands.elderly_assessment),
        ] {
            if band.minimum_percent >= band.maximum_percent {
                return Err(invalid(format!(
                    "support-worker band '{}' must have minimum below maximum",
                    name
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidRegulation {
        message: message.into(),
    }
}
