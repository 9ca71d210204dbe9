//! Calculation logic for the HYP coefficient engine.
//!
//! This module contains the criterion coefficient engine (success rates,
//! carry-over, Annex 2 banding), the unit aggregator (ceiling coefficient,
//! unit multiplier, final screening and follow-up coefficient), the
//! support-worker aggregator, the salary projector and display labels.

mod carry_over;
mod ceiling;
mod criterion_coefficient;
mod labels;
mod rounding;
mod salary;
mod success_rate;
mod support_worker;
mod unit_coefficient;
mod unit_multiplier;

pub use carry_over::{carry_out_to_next_period, remaining_count};
pub use ceiling::{CEILING_COEFFICIENT_CLAUSE, CeilingResult, calculate_ceiling_coefficient};
pub use criterion_coefficient::{
    BandedCoefficient, CRITERION_COEFFICIENT_CLAUSE, CriterionEvaluation, coefficient_from_success,
    evaluate_criterion,
};
pub use labels::{
    criterion_display_name, status_color_code, status_explanation,
    support_worker_criterion_display_name, unit_type_display_name,
};
pub use rounding::{round_coefficient, round_money, round_percent};
pub use salary::{compute_salary, compute_salary_with};
pub use success_rate::{
    CarryAdjustedSuccess, RemainingCounts, remaining_to_thresholds, success_percent,
    success_percent_with_carry,
};
pub use support_worker::{
    SUPPORT_WORKER_CLAUSE, compute_support_worker_coefficient,
    compute_support_worker_coefficient_with, support_worker_criterion_coefficient,
    unit_coefficient_threshold_ratio,
};
pub use unit_coefficient::{
    LOW_SCORE_EXCEPTION, NEW_UNIT_EXCEPTION, NEW_UNIT_WARNING, compute_unit_coefficient,
    compute_unit_coefficient_with,
};
pub use unit_multiplier::{UnitMultiplierResult, calculate_unit_multiplier};
