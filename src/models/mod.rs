//! Core data models for the HYP coefficient engine.
//!
//! This module contains all the domain records consumed and produced by the
//! calculations. Every record is built per call and never mutated afterwards.

mod audit;
mod criterion;
mod period;
mod salary;
mod support_worker;
mod unit;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use criterion::{CriterionInput, CriterionResult, CriterionType, StatusColor};
pub use period::period_start;
pub use salary::{SalaryInput, SalaryResult};
pub use support_worker::{
    SupportWorkerCriterionInput, SupportWorkerCriterionType, SupportWorkerInput,
    SupportWorkerResult,
};
pub use unit::{UnitInput, UnitResult, UnitType};
