//! Regulation tables for the HYP coefficient engine.
//!
//! This module holds the regulatory constants the calculations read:
//! criterion success bands, coefficient bounds, unit-type settings,
//! support-worker bands, wage rates and exception thresholds. A compiled-in
//! version is always available through [`Regulation::current`]; further
//! dated versions can be loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hyp_engine::config::RegulationLoader;
//!
//! let loader = RegulationLoader::load("./config/regulation").unwrap();
//! println!("Loaded {} regulation versions", loader.regulations().len());
//! ```

mod defaults;
mod loader;
mod types;

pub use loader::RegulationLoader;
pub use types::{
    CarryOverRules, CoefficientBounds, CriterionBand, ExceptionRules, Regulation,
    RegulationMetadata, SalaryRates, SupportWorkerBand, SupportWorkerBands, UnitTypeSettings,
    UnitTypeTable,
};
