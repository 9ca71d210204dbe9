//! HYP Screening and Follow-up Coefficient Engine
//!
//! This crate calculates the screening and follow-up coefficient of Turkish
//! family medicine units under the HYP (Hastalık Yönetim Platformu) rules in
//! force from 2025-06-01, the coefficient of the family health workers (ASÇ)
//! attached to those units, and the resulting gross salary projection.
//!
//! Every calculation records an audit trail naming the regulation clause
//! applied, and the regulation tables can be loaded from YAML files so that
//! later versions of the directive can be applied by effective date.
//!
//! ```
//! use hyp_engine::{UnitInput, UnitType, compute_unit_coefficient};
//! use hyp_engine::models::{CriterionInput, CriterionType, StatusColor};
//! use rust_decimal::Decimal;
//!
//! let mut input = UnitInput::new("ASM-001-01", "2025-12", 3500, UnitType::Normal);
//! input.criteria = vec![CriterionInput::new(CriterionType::HtScreening, 100, 0)];
//!
//! let result = compute_unit_coefficient(&input).unwrap();
//! assert_eq!(result.criterion_results[0].status, StatusColor::Red);
//! assert_eq!(result.screening_follow_up_coefficient, Decimal::new(90, 2));
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

pub use calculation::{
    compute_salary, compute_salary_with, compute_support_worker_coefficient,
    compute_support_worker_coefficient_with, compute_unit_coefficient,
    compute_unit_coefficient_with,
};
pub use config::{Regulation, RegulationLoader};
pub use error::{EngineError, EngineResult};
pub use models::{
    SalaryInput, SalaryResult, SupportWorkerInput, SupportWorkerResult, UnitInput, UnitResult,
    UnitType,
};
