use serde::{Deserialize, Serialize};

use super::{IndicatorVector, RateTriple, Scenario};

/// One recorded step of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,
    pub population: u64,
}

impl TrajectoryPoint {
    /// Record a step, rounding the population to whole persons.
    pub fn new(year: i32, population: f64) -> Self {
        Self {
            year,
            population: population.round().max(0.0) as u64,
        }
    }
}

/// Scenario names resolved for each indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSelection {
    pub gdp: Scenario,
    pub life: Scenario,
    pub urban: Scenario,
}

/// Growth inputs used as features by the rate-driven projection, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthInputs {
    pub gdp: f64,
    pub life: f64,
    pub urban: f64,
}

impl GrowthInputs {
    pub fn features(&self) -> [f64; 3] {
        [self.gdp, self.life, self.urban]
    }
}

/// Assumptions and end state behind a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProjectionMetadata {
    Indicators {
        scenarios: ScenarioSelection,
        final_indicators: IndicatorVector,
        /// Rates from the last step that used the models, per 1000
        final_rates: Option<RateTriple>,
        fallback_steps: u32,
    },
    Rates {
        growth_rates: GrowthInputs,
        /// Rates after the last step, per 1000
        final_rates: RateTriple,
        held_steps: u32,
    },
}

/// A population trajectory plus the metadata needed to audit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub trajectory: Vec<TrajectoryPoint>,
    pub metadata: ProjectionMetadata,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.trajectory.iter().map(|p| p.year).collect()
    }

    pub fn populations(&self) -> Vec<u64> {
        self.trajectory.iter().map(|p| p.population).collect()
    }

    pub fn final_population(&self) -> Option<u64> {
        self.trajectory.last().map(|p| p.population)
    }

    /// Number of steps that did not use the rate models.
    pub fn fallback_steps(&self) -> u32 {
        match self.metadata {
            ProjectionMetadata::Indicators { fallback_steps, .. } => fallback_steps,
            ProjectionMetadata::Rates { held_steps, .. } => held_steps,
        }
    }
}
