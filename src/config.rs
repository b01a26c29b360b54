//! Projector configuration, loaded once at startup from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::models::ScenarioTable;
use crate::predictor::{LinearModelSet, RatePredictors};

fn default_seed_year() -> i32 {
    2025
}

fn default_max_horizon_years() -> u32 {
    100
}

/// Upper bound accepted for `max_horizon_years`.
pub const HORIZON_LIMIT_YEARS: u32 = 1000;

fn default_log_level() -> String {
    "warn".to_string()
}

/// Immutable settings shared by every projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Calendar year of the seed population
    #[serde(default = "default_seed_year")]
    pub seed_year: i32,
    /// Longest accepted projection horizon, in years
    #[serde(default = "default_max_horizon_years")]
    pub max_horizon_years: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scenarios: ScenarioTable,
    #[serde(default)]
    pub models: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Rate models for both projection modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Absolute rates per 1000 from `[gdp, life, urban]` levels
    #[serde(default)]
    pub indicator: LinearModelSet,
    /// Percent rate changes from `[gdp, life, urban]` growth inputs
    #[serde(default)]
    pub change: LinearModelSet,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            seed_year: default_seed_year(),
            max_horizon_years: default_max_horizon_years(),
            logging: LoggingConfig::default(),
            scenarios: ScenarioTable::default(),
            models: ModelConfig::default(),
        }
    }
}

impl ProjectorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ProjectionError> {
        let config: ProjectorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectionError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.max_horizon_years == 0 || self.max_horizon_years > HORIZON_LIMIT_YEARS {
            return Err(ProjectionError::Config(format!(
                "max_horizon_years must be in 1..={HORIZON_LIMIT_YEARS}, got {}",
                self.max_horizon_years
            )));
        }
        if self.year_after_seed(self.max_horizon_years).is_none() {
            return Err(ProjectionError::Config(format!(
                "seed_year {} plus max_horizon_years {} does not fit a calendar year",
                self.seed_year, self.max_horizon_years
            )));
        }
        self.scenarios.validate()?;
        self.models.indicator.validate()?;
        self.models.change.validate()?;
        Ok(())
    }

    /// Calendar year `years` after the seed year, if representable.
    pub fn year_after_seed(&self, years: u32) -> Option<i32> {
        i32::try_from(years)
            .ok()
            .and_then(|years| self.seed_year.checked_add(years))
    }

    /// Predictors for the indicator-driven projection.
    pub fn indicator_predictors(&self) -> RatePredictors {
        self.models.indicator.to_predictors()
    }

    /// Predictors for the rate-driven projection.
    pub fn change_predictors(&self) -> RatePredictors {
        self.models.change.to_predictors()
    }
}
