//! Regulation loading functionality.
//!
//! This module provides the [`RegulationLoader`] type for loading
//! regulation versions from YAML files and selecting the one in force for a
//! calculation period.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::period_start;

use super::types::Regulation;

/// Loads and provides access to dated regulation versions.
///
/// # Directory Structure
///
/// Every `*.yaml` file in the directory is one complete regulation:
/// ```text
/// config/regulation/
/// ├── 2025-06-01.yaml
/// └── 2026-01-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use hyp_engine::config::RegulationLoader;
///
/// let loader = RegulationLoader::load("./config/regulation")?;
/// let regulation = loader.for_period("2025-12")?;
/// println!("In force: {}", regulation.metadata().effective_date);
/// # Ok::<(), hyp_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RegulationLoader {
    /// Regulations sorted by effective date, oldest first.
    regulations: Vec<Regulation>,
}

impl RegulationLoader {
    /// Loads every regulation file from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `RegulationLoader` on success, or an error if:
    /// - The directory is missing or contains no regulation files
    /// - Any file contains invalid YAML or misses a table
    /// - Any regulation fails [`Regulation::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut regulations = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                regulations.push(Self::load_file(&path)?);
            }
        }

        if regulations.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no regulation files found)", dir_str),
            });
        }

        Self::from_regulations(regulations)
    }

    /// Loads and parses a single regulation file.
    ///
    /// Tables that fail validation are reported as `ConfigParseError`.
    pub fn load_file(path: &Path) -> EngineResult<Regulation> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let regulation: Regulation =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        debug!(
            path = %path_str,
            effective_date = %regulation.metadata().effective_date,
            "Loaded regulation"
        );

        Ok(regulation)
    }

    /// Builds a loader from already constructed regulations.
    ///
    /// Each regulation is validated; two versions with the same effective
    /// date are rejected.
    pub fn from_regulations(mut regulations: Vec<Regulation>) -> EngineResult<Self> {
        for regulation in &regulations {
            regulation.validate()?;
        }

        regulations.sort_by_key(|r| r.metadata().effective_date);

        if let Some(pair) = regulations
            .windows(2)
            .find(|w| w[0].metadata().effective_date == w[1].metadata().effective_date)
        {
            return Err(EngineError::InvalidRegulation {
                message: format!(
                    "two regulations share effective date {}",
                    pair[0].metadata().effective_date
                ),
            });
        }

        Ok(Self { regulations })
    }

    /// Returns every loaded regulation, oldest first.
    pub fn regulations(&self) -> &[Regulation] {
        &self.regulations
    }

    /// Returns the most recent regulation.
    pub fn latest(&self) -> Option<&Regulation> {
        self.regulations.last()
    }

    /// Returns the regulation in force on a date: the most recent one
    /// effective on or before it.
    pub fn in_force_on(&self, date: NaiveDate) -> Option<&Regulation> {
        self.regulations
            .iter()
            .rfind(|r| r.metadata().effective_date <= date)
    }

    /// Returns the regulation in force on the first day of a `YYYY-MM` period.
    pub fn for_period(&self, period: &str) -> EngineResult<&Regulation> {
        let date = period_start(period)?;
        self.in_force_on(date)
            .ok_or_else(|| EngineError::RegulationNotFound {
                period: period.to_string(),
            })
    }
}
