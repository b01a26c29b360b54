use serde::{Deserialize, Serialize};

use super::ScenarioEffect;
use crate::error::ProjectionError;

pub const LIFE_EXPECTANCY_RANGE: (f64, f64) = (0.0, 120.0);
pub const URBANIZATION_RANGE: (f64, f64) = (0.0, 100.0);

/// Socioeconomic state of a population at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorVector {
    /// GDP per capita (currency units, must be positive)
    pub gdp_per_capita: f64,
    /// Life expectancy at birth in years (0-120)
    pub life_expectancy: f64,
    /// Urban share of the population in percent (0-100)
    pub urbanization: f64,
}

impl IndicatorVector {
    pub fn new(gdp_per_capita: f64, life_expectancy: f64, urbanization: f64) -> Self {
        Self {
            gdp_per_capita,
            life_expectancy,
            urbanization,
        }
    }

    /// Feature vector in model order: `[gdp, life, urban]`.
    pub fn features(&self) -> [f64; 3] {
        [self.gdp_per_capita, self.life_expectancy, self.urbanization]
    }

    /// Move the indicators forward one step under the given scenario effects.
    pub fn advance(&mut self, gdp: &ScenarioEffect, life: &ScenarioEffect, urban: &ScenarioEffect) {
        self.gdp_per_capita *= 1.0 + gdp.gdp_mult;
        self.life_expectancy = (self.life_expectancy + life.life_delta)
            .clamp(LIFE_EXPECTANCY_RANGE.0, LIFE_EXPECTANCY_RANGE.1);
        self.urbanization = (self.urbanization + urban.urban_delta)
            .clamp(URBANIZATION_RANGE.0, URBANIZATION_RANGE.1);
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.gdp_per_capita.is_finite() || self.gdp_per_capita <= 0.0 {
            return Err(ProjectionError::InvalidParameters(format!(
                "GDP per capita must be positive, got {}",
                self.gdp_per_capita
            )));
        }
        let (lo, hi) = LIFE_EXPECTANCY_RANGE;
        if !(lo..=hi).contains(&self.life_expectancy) {
            return Err(ProjectionError::InvalidParameters(format!(
                "life expectancy must be in {lo}..={hi}, got {}",
                self.life_expectancy
            )));
        }
        let (lo, hi) = URBANIZATION_RANGE;
        if !(lo..=hi).contains(&self.urbanization) {
            return Err(ProjectionError::InvalidParameters(format!(
                "urbanization must be in {lo}..={hi}, got {}",
                self.urbanization
            )));
        }
        Ok(())
    }
}
