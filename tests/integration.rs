//! Integration tests for the HYP coefficient engine.
//!
//! This test suite exercises the public API end to end:
//! - Criterion coefficients and status colours
//! - Carry-over in and out of a period
//! - Ceiling coefficient and unit multiplier per unit type
//! - Exception rules (low salary-basis score, new units)
//! - Support-worker (ASÇ) reconciliation
//! - Salary projection
//! - Regulation loading from YAML
//! - Property tests over the calculation invariants

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

use hyp_engine::calculation::{
    calculate_unit_multiplier, coefficient_from_success, criterion_display_name,
    remaining_to_thresholds, status_explanation, success_percent, success_percent_with_carry,
};
use hyp_engine::config::{Regulation, RegulationLoader};
use hyp_engine::models::{
    CriterionInput, CriterionType, SalaryInput, StatusColor, SupportWorkerCriterionInput,
    SupportWorkerCriterionType, SupportWorkerInput, UnitInput, UnitType,
};
use hyp_engine::{
    EngineError, compute_salary, compute_support_worker_coefficient, compute_unit_coefficient,
    compute_unit_coefficient_with,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Writes the shipped regulation with one line replaced to a temporary file.
fn edited_regulation_file(name: &str, from: &str, to: &str) -> std::path::PathBuf {
    let shipped = std::fs::read_to_string("./config/regulation/2025-06-01.yaml").unwrap();
    assert!(shipped.contains(from), "shipped regulation has no '{}'", from);
    let path = std::env::temp_dir().join(format!("hyp-engine-{}-{}.yaml", name, std::process::id()));
    std::fs::write(&path, shipped.replacen(from, to, 1)).unwrap();
    path
}

fn unit(population: u32, unit_type: UnitType, criteria: Vec<CriterionInput>) -> UnitInput {
    let mut input = UnitInput::new("ASM-001-01", "2025-12", population, unit_type);
    input.criteria = criteria;
    input
}

fn support_worker(
    unit_coefficient: &str,
    vital_signs: (u32, u32),
    elderly_assessment: (u32, u32),
) -> SupportWorkerInput {
    SupportWorkerInput {
        unit_id: "ASM-001-01".to_string(),
        period: "2025-12".to_string(),
        unit_coefficient: decimal(unit_coefficient),
        criteria: vec![
            SupportWorkerCriterionInput {
                criterion: SupportWorkerCriterionType::VitalSigns,
                required: vital_signs.0,
                done: vital_signs.1,
            },
            SupportWorkerCriterionInput {
                criterion: SupportWorkerCriterionType::ElderlyAssessment,
                required: elderly_assessment.0,
                done: elderly_assessment.1,
            },
        ],
    }
}

// =============================================================================
// SECTION 1: Criterion Scenarios
// =============================================================================

#[test]
fn test_nothing_done_is_red_at_floor() {
    let result = compute_unit_coefficient(&unit(
        4000,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::HtScreening, 100, 0)],
    ))
    .unwrap();

    let criterion = &result.criterion_results[0];
    assert_eq!(criterion.coefficient, decimal("0.90"));
    assert_eq!(criterion.status, StatusColor::Red);
    assert_eq!(criterion.remaining, 100);
    assert_eq!(result.screening_follow_up_coefficient, decimal("0.90"));
}

#[test]
fn test_carry_in_reaches_yellow_without_carry_out() {
    let result = compute_unit_coefficient(&unit(
        4000,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::DmScreening, 100, 85).with_carry_in(10)],
    ))
    .unwrap();

    let criterion = &result.criterion_results[0];
    assert_eq!(criterion.success_percent_with_carry, decimal("95"));
    assert_eq!(criterion.status, StatusColor::Yellow);
    assert_eq!(criterion.coefficient, Decimal::ONE);
    assert_eq!(criterion.carry_out, 0);
}

#[test]
fn test_carry_in_ignored_below_ten_percent_done() {
    let result = compute_unit_coefficient(&unit(
        4000,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::HtScreening, 100, 9).with_carry_in(80)],
    ))
    .unwrap();

    let criterion = &result.criterion_results[0];
    assert_eq!(criterion.success_percent_with_carry, decimal("9"));
    assert_eq!(criterion.status, StatusColor::Red);
}

#[test]
fn test_orange_criterion_carries_surplus() {
    let result = compute_unit_coefficient(&unit(
        4000,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::BreastScreening, 200, 260)],
    ))
    .unwrap();

    let criterion = &result.criterion_results[0];
    assert_eq!(criterion.status, StatusColor::Orange);
    assert_eq!(criterion.coefficient, Decimal::ONE);
    assert_eq!(criterion.carry_out, 60);
    assert_eq!(criterion.remaining, 0);
}

#[test]
fn test_zero_target_criterion_is_neutral() {
    let result = compute_unit_coefficient(&unit(
        4000,
        UnitType::Normal,
        vec![
            CriterionInput::new(CriterionType::ElderlyOutcome, 0, 0),
            CriterionInput::new(CriterionType::ColorectalScreening, 80, 20),
        ],
    ))
    .unwrap();

    assert_eq!(result.criterion_results[0].status, StatusColor::Green);
    // 25% against a 50% minimum: 0.90 + 0.5 × 0.10
    assert_eq!(result.criterion_results[1].coefficient, decimal("0.95"));
    assert_eq!(result.criterion_product, decimal("0.95"));
}

#[test]
fn test_process_management_band_tops_out_at_80() {
    let result = compute_unit_coefficient(&unit(
        4000,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::ProcessManagement, 10, 9)],
    ))
    .unwrap();
    assert_eq!(result.criterion_results[0].status, StatusColor::Yellow);
}

// =============================================================================
// SECTION 2: Unit Aggregation
// =============================================================================

#[test]
fn test_normal_unit_ceiling_at_3500() {
    let result = compute_unit_coefficient(&unit(3500, UnitType::Normal, vec![])).unwrap();
    assert_eq!(result.ceiling_coefficient, decimal("1.1429"));
    assert_eq!(result.unit_multiplier, decimal("1.00"));
}

#[test]
fn test_referral_system_raises_cap() {
    let mut input = unit(1500, UnitType::Normal, vec![]);
    assert_eq!(
        compute_unit_coefficient(&input).unwrap().ceiling_coefficient,
        decimal("1.50")
    );

    input.referral_system_active = true;
    assert_eq!(
        compute_unit_coefficient(&input).unwrap().ceiling_coefficient,
        decimal("2.00")
    );
}

#[test]
fn test_detainee_facility_tiers() {
    let ceiling = |population| {
        compute_unit_coefficient(&unit(population, UnitType::DetaineeFacility, vec![]))
            .unwrap()
            .ceiling_coefficient
    };
    assert_eq!(ceiling(1800), decimal("1.1765"));
    assert_eq!(ceiling(1600), decimal("1.3333"));
    assert_eq!(ceiling(1200), decimal("1.50"));
    assert_eq!(ceiling(1400), decimal("1.50"));
}

#[test]
fn test_detainee_facility_measured_against_normal_unit_maximum() {
    let criteria = || vec![CriterionInput::new(CriterionType::HtScreening, 100, 95)];

    let mut input = unit(1400, UnitType::DetaineeFacility, criteria());
    input.referral_system_active = true;
    let result = compute_unit_coefficient(&input).unwrap();
    assert_eq!(result.ceiling_coefficient, decimal("2.00"));

    let result = compute_unit_coefficient(&unit(3000, UnitType::DetaineeFacility, criteria()))
        .unwrap();
    assert_eq!(result.criterion_results[0].status, StatusColor::Yellow);
    assert_eq!(result.ceiling_coefficient, decimal("1.1765"));

    let result = compute_unit_coefficient(&unit(4001, UnitType::DetaineeFacility, criteria()))
        .unwrap();
    assert_eq!(result.criterion_results[0].status, StatusColor::Green);
}

#[test]
fn test_mandatory_low_population_unit_with_missed_on_call() {
    let mut input = unit(
        2400,
        UnitType::MandatoryLowPopulation,
        vec![CriterionInput::new(CriterionType::HtFollowUp, 40, 30)],
    );
    input.on_call_hours = Some(70);
    let result = compute_unit_coefficient(&input).unwrap();

    // 26 hours short: 3 blocks, 24% off
    assert_eq!(result.unit_multiplier, decimal("1.254"));
    assert_eq!(result.ceiling_coefficient, decimal("1"));
    assert_eq!(result.screening_follow_up_coefficient, decimal("1"));
}

#[test]
fn test_over_capacity_unit_criteria_reported_green() {
    let result = compute_unit_coefficient(&unit(
        4500,
        UnitType::Normal,
        vec![
            CriterionInput::new(CriterionType::HtScreening, 100, 150),
            CriterionInput::new(CriterionType::DmScreening, 100, 30),
        ],
    ))
    .unwrap();

    assert_eq!(result.criterion_results[0].status, StatusColor::Green);
    assert_eq!(result.criterion_results[0].carry_out, 50);
    assert_eq!(result.criterion_results[1].status, StatusColor::Red);
}

#[test]
fn test_full_nineteen_criterion_unit() {
    let criteria = CriterionType::ALL
        .iter()
        .map(|c| CriterionInput::new(*c, 100, 60))
        .collect();
    let result = compute_unit_coefficient(&unit(3200, UnitType::Normal, criteria)).unwrap();

    assert_eq!(result.criterion_results.len(), 19);
    assert!(
        result
            .criterion_results
            .iter()
            .all(|c| c.status == StatusColor::Green)
    );
    assert_eq!(result.screening_follow_up_coefficient, Decimal::ONE);
    assert_eq!(result.ceiling_coefficient, decimal("1.25"));
}

#[test]
fn test_low_salary_basis_score_exception() {
    let mut input = unit(
        3000,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::HtScreening, 100, 0)],
    );
    input.salary_basis_score = Some(decimal("850"));
    let result = compute_unit_coefficient(&input).unwrap();

    assert_eq!(result.screening_follow_up_coefficient, Decimal::ONE);
    assert!(result.criterion_results.is_empty());
    assert!(result.exception_note.is_some());
}

#[test]
fn test_new_unit_exception_is_flagged() {
    let mut input = unit(3000, UnitType::Normal, vec![]);
    input.unit_age_months = Some(6);
    input.population_at_six_months = Some(1200);
    let result = compute_unit_coefficient(&input).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.audit_trace.warnings.len(), 1);
    assert!(result.exception_note.is_some());
}

#[test]
fn test_unit_input_from_json() {
    let input: UnitInput = serde_json::from_value(json!({
        "unit_id": "ASM-002-03",
        "period": "2025-11",
        "population": 2200,
        "unit_type": "integrated",
        "on_call_hours": 96,
        "criteria": [
            {"criterion": "ht_screening", "required": 120, "done": 70},
            {"criterion": "cvr_follow_up", "required": 30, "done": 12, "carry_in": 4}
        ]
    }))
    .unwrap();

    let result = compute_unit_coefficient(&input).unwrap();
    assert_eq!(result.unit_multiplier, decimal("1.65"));
    assert_eq!(result.criterion_results[1].success_percent_with_carry, decimal("53.33"));

    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(serialized["unit_type"], "integrated");
    assert_eq!(serialized["criterion_results"][0]["criterion"], "ht_screening");
}

#[test]
fn test_unknown_criterion_is_rejected() {
    let parsed: Result<UnitInput, _> = serde_json::from_value(json!({
        "unit_id": "ASM-002-03",
        "period": "2025-11",
        "population": 2200,
        "unit_type": "normal",
        "criteria": [{"criterion": "asthma_screening", "required": 1, "done": 1}]
    }));
    assert!(parsed.is_err());
}

#[test]
fn test_malformed_period_is_rejected() {
    let mut input = unit(3000, UnitType::Normal, vec![]);
    input.period = "2025/12".to_string();
    let error = compute_unit_coefficient(&input).unwrap_err();
    assert!(matches!(error, EngineError::InvalidArgument { .. }));
    assert!(error.to_string().contains("period"));
}

// =============================================================================
// SECTION 3: Support Worker (ASÇ)
// =============================================================================

#[test]
fn test_support_worker_below_threshold_keeps_own_coefficient() {
    let result =
        compute_support_worker_coefficient(&support_worker("1.40", (100, 50), (100, 50))).unwrap();
    assert_eq!(result.final_coefficient, decimal("1.00"));
    assert!(!result.unit_coefficient_used);
}

#[test]
fn test_support_worker_gets_unit_coefficient() {
    let result =
        compute_support_worker_coefficient(&support_worker("1.30", (100, 80), (100, 80))).unwrap();
    // 1.045 × 1.0975
    assert_eq!(result.support_worker_coefficient, decimal("1.1469"));
    assert_eq!(result.final_coefficient, decimal("1.30"));
    assert!(result.unit_coefficient_used);
}

#[test]
fn test_support_worker_chained_from_unit_result() {
    let unit_result = compute_unit_coefficient(&unit(2000, UnitType::Normal, vec![])).unwrap();
    let result = compute_support_worker_coefficient(&support_worker(
        &unit_result.screening_follow_up_coefficient.to_string(),
        (100, 95),
        (100, 95),
    ))
    .unwrap();
    assert_eq!(result.final_coefficient, decimal("1.1978"));
    assert!(result.explanation.contains("higher than unit"));
}

// =============================================================================
// SECTION 4: Salary
// =============================================================================

#[test]
fn test_salary_projection() {
    let input = SalaryInput {
        intermediate_score: decimal("1200"),
        screening_follow_up_coefficient: decimal("1.10"),
        unit_multiplier: Decimal::ONE,
        ceiling_wage: decimal("10000"),
        is_specialist: false,
        is_family_medicine_specialist: false,
    };
    let result = compute_salary(&input).unwrap();

    let adjusted = decimal("1200") * decimal("1.10");
    let first = decimal("10000") * decimal("0.785");
    let rest = (adjusted - decimal("1000")) * decimal("10000") * decimal("0.000522");

    assert_eq!(result.score_adjusted_for_coefficient, adjusted);
    assert_eq!(result.first_1000_point_wage, first);
    assert_eq!(result.remaining_point_wage, rest);
    assert_eq!(result.total_gross_salary, first + rest);
}

#[test]
fn test_salary_from_json_defaults() {
    let input: SalaryInput = serde_json::from_value(json!({
        "intermediate_score": "900",
        "screening_follow_up_coefficient": "1",
        "ceiling_wage": "20000",
        "is_family_medicine_specialist": true
    }))
    .unwrap();
    let result = compute_salary(&input).unwrap();
    assert_eq!(result.first_1000_point_wage, decimal("22700"));
    assert_eq!(result.total_gross_salary, decimal("22700"));
}

// =============================================================================
// SECTION 5: Regulation Loading
// =============================================================================

#[test]
fn test_shipped_regulation_matches_built_in() {
    let loader = RegulationLoader::load("./config/regulation").unwrap();
    let loaded = loader.for_period("2025-12").unwrap();
    assert_eq!(loaded, Regulation::current());
}

#[test]
fn test_no_regulation_before_first_effective_date() {
    let loader = RegulationLoader::load("./config/regulation").unwrap();
    assert!(matches!(
        loader.for_period("2025-05"),
        Err(EngineError::RegulationNotFound { .. })
    ));
}

#[test]
fn test_loaded_regulation_drives_calculation() {
    let loader = RegulationLoader::load("./config/regulation").unwrap();
    let input = unit(
        3500,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::DmScreening, 100, 85).with_carry_in(10)],
    );
    let regulation = loader.for_period(&input.period).unwrap();

    assert_eq!(
        compute_unit_coefficient_with(regulation, &input).unwrap(),
        compute_unit_coefficient(&input).unwrap()
    );
}

#[test]
fn test_regulation_file_with_zero_shortfall_block_is_rejected() {
    let path = edited_regulation_file(
        "zero-block",
        "shortfall_block_hours: 8",
        "shortfall_block_hours: 0",
    );
    let result = RegulationLoader::load_file(&path);
    std::fs::remove_file(&path).unwrap();

    match result {
        Err(EngineError::ConfigParseError { message, .. }) => {
            assert!(message.contains("shortfall_block_hours"), "{}", message);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_loaded_red_band_cap_is_applied() {
    let path = edited_regulation_file(
        "red-cap",
        "below_minimum_coefficient_cap: \"0.9999\"",
        "below_minimum_coefficient_cap: \"0.95\"",
    );
    let regulation = RegulationLoader::load_file(&path);
    std::fs::remove_file(&path).unwrap();
    let regulation = regulation.unwrap();

    let input = unit(
        3500,
        UnitType::Normal,
        vec![CriterionInput::new(CriterionType::HtScreening, 100, 39)],
    );
    let loaded = compute_unit_coefficient_with(&regulation, &input).unwrap();
    assert_eq!(loaded.criterion_results[0].coefficient, decimal("0.95"));

    let built_in = compute_unit_coefficient(&input).unwrap();
    assert_eq!(built_in.criterion_results[0].coefficient, decimal("0.9975"));
}

#[test]
fn test_missing_regulation_directory() {
    assert!(matches!(
        RegulationLoader::load("./config/does-not-exist"),
        Err(EngineError::ConfigNotFound { .. })
    ));
}

// =============================================================================
// SECTION 6: Helpers and Labels
// =============================================================================

#[test]
fn test_remaining_to_thresholds() {
    let remaining = remaining_to_thresholds(95, 30);
    assert_eq!(remaining.to_40_percent, 8);
    assert_eq!(remaining.to_70_percent, 37);
    assert_eq!(remaining.to_90_percent, 56);
}

#[test]
fn test_labels() {
    assert_eq!(status_explanation(StatusColor::Green), "İdeal aralıkta");
    assert_eq!(criterion_display_name(CriterionType::ProcessManagement), "Süreç Yönetimi");
}

// =============================================================================
// SECTION 7: Properties
// =============================================================================

fn criterion_strategy() -> impl Strategy<Value = CriterionInput> {
    (0..CriterionType::ALL.len(), 0u32..500, 0u32..700, 0u32..100).prop_map(
        |(index, required, done, carry_in)| {
            CriterionInput::new(CriterionType::ALL[index], required, done).with_carry_in(carry_in)
        },
    )
}

fn unit_type_strategy() -> impl Strategy<Value = UnitType> {
    prop_oneof![
        Just(UnitType::Normal),
        Just(UnitType::Integrated),
        Just(UnitType::MandatoryLowPopulation),
        Just(UnitType::DetaineeFacility),
    ]
}

proptest! {
    /// Red coefficients never decrease as success rises, and every success
    /// at or above the band minimum pays exactly 1.
    #[test]
    fn coefficient_is_monotonic(a in 0u32..=20_000, b in 0u32..=20_000, minimum in 1u32..=90) {
        let regulation = Regulation::current();
        let band = hyp_engine::config::CriterionBand::new(minimum, 90);
        let (low, high) = (a.min(b), a.max(b));
        let low = Decimal::new(i64::from(low), 2);
        let high = Decimal::new(i64::from(high), 2);

        let low_coefficient = coefficient_from_success(low, &band, regulation.coefficient_bounds());
        let high_coefficient = coefficient_from_success(high, &band, regulation.coefficient_bounds());

        prop_assert!(low_coefficient.coefficient <= high_coefficient.coefficient);
        if high >= Decimal::from(minimum) {
            prop_assert_eq!(high_coefficient.coefficient, Decimal::ONE);
        } else {
            prop_assert!(high_coefficient.coefficient < Decimal::ONE);
            prop_assert!(high_coefficient.coefficient >= Decimal::new(90, 2));
        }
    }

    /// Carry-in only counts when at least 10% was done in the period.
    #[test]
    fn carry_gate(required in 1u32..2000, done in 0u32..2000, carry_in in 0u32..500) {
        let ratio = Regulation::current().carry_over_rules().minimum_done_ratio;
        let adjusted = success_percent_with_carry(done, required, carry_in, ratio);
        let gate = u64::from(done) * 10 >= u64::from(required) && carry_in > 0;

        prop_assert_eq!(adjusted.used_carry, gate);
        if !gate {
            prop_assert_eq!(adjusted.percent, success_percent(done, required));
        }
    }

    /// The final coefficient always lies between the floor and the ceiling.
    #[test]
    fn final_coefficient_is_bounded(
        population in 0u32..6000,
        unit_type in unit_type_strategy(),
        referral in any::<bool>(),
        criteria in proptest::collection::vec(criterion_strategy(), 0..19),
    ) {
        let mut input = unit(population, unit_type, criteria);
        input.referral_system_active = referral;
        let result = compute_unit_coefficient(&input).unwrap();

        prop_assert!(result.screening_follow_up_coefficient >= Decimal::new(90, 2));
        prop_assert!(result.screening_follow_up_coefficient <= result.ceiling_coefficient);
        prop_assert!(result.ceiling_coefficient >= Decimal::ONE);
    }

    /// Logging fewer on-call hours never raises the multiplier.
    #[test]
    fn multiplier_is_non_increasing(hours in 0u32..200) {
        let settings = Regulation::current().unit_type_settings(UnitType::Integrated);
        let fewer = calculate_unit_multiplier(settings, Some(hours), 1).multiplier;
        let more = calculate_unit_multiplier(settings, Some(hours + 1), 1).multiplier;
        prop_assert!(fewer <= more);
    }
}
