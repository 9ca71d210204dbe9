//! The compiled-in regulation.
//!
//! Tables of the screening and follow-up directive and the HYP guide in
//! force from 2025-06-01, together with Article 18 of the family medicine
//! payment regulation.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::CriterionType;

use super::types::{
    CarryOverRules, CoefficientBounds, CriterionBand, ExceptionRules, Regulation,
    RegulationMetadata, RegulationTables, SalaryRates, SupportWorkerBand, SupportWorkerBands, UnitTypeSettings,
    UnitTypeTable,
};

static CURRENT: LazyLock<Regulation> = LazyLock::new(build_current);

impl Regulation {
    /// Returns the compiled-in regulation effective from 2025-06-01.
    ///
    /// # Example
    ///
    /// ```
    /// use hyp_engine::config::Regulation;
    /// use hyp_engine::models::CriterionType;
    /// use rust_decimal::Decimal;
    ///
    /// let band = Regulation::current()
    ///     .criterion_band(CriterionType::ProcessManagement)
    ///     .unwrap();
    /// assert_eq!(band.maximum_percent, Decimal::from(80));
    /// ```
    pub fn current() -> &'static Regulation {
        &CURRENT
    }
}

fn build_current() -> Regulation {
    use CriterionType::*;

    // Annex 1. Follow-up criteria and the cervical/colorectal screenings start
    // at 50%; process management tops out at 80%.
    let criterion_bands: HashMap<CriterionType, CriterionBand> = [
        (HtScreening, CriterionBand::new(40, 90)),
        (HtFollowUp, CriterionBand::new(50, 90)),
        (HtOutcome, CriterionBand::new(40, 90)),
        (DmScreening, CriterionBand::new(40, 90)),
        (DmFollowUp, CriterionBand::new(50, 90)),
        (DmOutcome, CriterionBand::new(40, 90)),
        (ObesityScreening, CriterionBand::new(40, 90)),
        (ObesityFollowUp, CriterionBand::new(50, 90)),
        (ObesityOutcome, CriterionBand::new(40, 90)),
        (CvrScreening, CriterionBand::new(40, 90)),
        (CvrFollowUp, CriterionBand::new(50, 90)),
        (CvrOutcome, CriterionBand::new(40, 90)),
        (ElderlyScreening, CriterionBand::new(40, 90)),
        (ElderlyFollowUp, CriterionBand::new(50, 90)),
        (ElderlyOutcome, CriterionBand::new(40, 90)),
        (CervicalScreening, CriterionBand::new(50, 90)),
        (ColorectalScreening, CriterionBand::new(50, 90)),
        (BreastScreening, CriterionBand::new(40, 90)),
        (ProcessManagement, CriterionBand::new(50, 80)),
    ]
    .into_iter()
    .collect();

    let coefficient_bounds = CoefficientBounds {
        minimum_coefficient: Decimal::new(90, 2),
        maximum_coefficient: Decimal::new(150, 2),
        maximum_coefficient_with_referral: Decimal::new(200, 2),
        nothing_done_coefficient: Decimal::new(90, 2),
        below_minimum_coefficient_min: Decimal::new(90, 2),
        below_minimum_coefficient_max: Decimal::new(99, 2),
        below_minimum_coefficient_cap: Decimal::new(9999, 4),
    };

    let on_call = UnitTypeSettings::OnCall {
        max_population: 2400,
        base_multiplier: Decimal::new(165, 2),
        required_monthly_hours: 96,
        shortfall_block_hours: 8,
        penalty_per_block: Decimal::new(8, 2),
    };

    let unit_types = UnitTypeTable {
        normal: UnitTypeSettings::Standard {
            max_population: 4000,
            base_multiplier: Decimal::new(100, 2),
        },
        integrated: on_call,
        mandatory_low_population: on_call,
        detainee_facility: UnitTypeSettings::DetaineeFacility {
            max_population: 2000,
            upper_tier_threshold: 1700,
            lower_tier_threshold: 1500,
            upper_tier_ceiling: Decimal::new(1176471, 6),
            lower_tier_ceiling: Decimal::new(1333334, 6),
        },
    };

    let support_worker_bands = SupportWorkerBands {
        vital_signs: SupportWorkerBand {
            minimum_percent: Decimal::from(50),
            maximum_percent: Decimal::from(90),
            below_minimum_coefficient: Decimal::new(93, 2),
            at_minimum_coefficient: Decimal::new(100, 2),
            at_maximum_coefficient: Decimal::new(106, 2),
        },
        elderly_assessment: SupportWorkerBand {
            minimum_percent: Decimal::from(50),
            maximum_percent: Decimal::from(90),
            below_minimum_coefficient: Decimal::new(97, 2),
            at_minimum_coefficient: Decimal::new(100, 2),
            at_maximum_coefficient: Decimal::new(113, 2),
        },
    };

    let salary_rates = SalaryRates {
        base_points: Decimal::from(1000),
        family_medicine_specialist_rate: Decimal::new(1135, 3),
        standard_rate: Decimal::new(785, 3),
        per_point_rate: Decimal::new(522, 6),
    };

    let exception_rules = ExceptionRules {
        salary_basis_score_floor: Decimal::from(1000),
        new_unit_max_age_months: 18,
        new_unit_min_population_at_six_months: 500,
    };

    let carry_over_rules = CarryOverRules {
        minimum_done_ratio: Decimal::new(10, 2),
    };

    let metadata = RegulationMetadata {
        name: "Family Medicine Screening and Follow-up Coefficient Directive".to_string(),
        effective_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
        source: "HYP Screening and Follow-up Guide (2025-06-01); Payment Regulation Art. 18"
            .to_string(),
    };

    Regulation::from_tables_unchecked(RegulationTables {
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
