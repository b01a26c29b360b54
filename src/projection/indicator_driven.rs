use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{validate_horizon, validate_seed_population, POPULATION_FLOOR};
use crate::config::ProjectorConfig;
use crate::error::ProjectionError;
use crate::models::{
    IndicatorVector, Projection, ProjectionMetadata, RateTriple, ScenarioSelection,
    TrajectoryPoint,
};
use crate::predictor::RatePredictors;

/// Years covered by one step of the indicator-driven projection.
pub const STEP_YEARS: u32 = 5;
/// Death-rate offset subtracted from GDP growth when no model is usable.
pub const FALLBACK_DEATH_OFFSET: f64 = 0.008;

const HIGH_INCOME_GDP: f64 = 50_000.0;
const HIGH_INCOME_FACTOR: f64 = 0.5;
const MIDDLE_INCOME_GDP: f64 = 20_000.0;
const MIDDLE_INCOME_FACTOR: f64 = 0.7;

fn default_scenario() -> String {
    "medium".to_string()
}

fn default_horizon() -> u32 {
    75
}

/// Inputs of an indicator-driven projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub initial_population: f64,
    pub indicators: IndicatorVector,
    #[serde(default = "default_scenario")]
    pub gdp_scenario: String,
    #[serde(default = "default_scenario")]
    pub life_scenario: String,
    #[serde(default = "default_scenario")]
    pub urban_scenario: String,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
}

impl IndicatorRequest {
    /// A request using the medium scenario for every indicator.
    pub fn new(initial_population: f64, indicators: IndicatorVector, horizon_years: u32) -> Self {
        Self {
            initial_population,
            indicators,
            gdp_scenario: default_scenario(),
            life_scenario: default_scenario(),
            urban_scenario: default_scenario(),
            horizon_years,
        }
    }

    pub fn with_scenarios(mut self, gdp: &str, life: &str, urban: &str) -> Self {
        self.gdp_scenario = gdp.to_string();
        self.life_scenario = life.to_string();
        self.urban_scenario = urban.to_string();
        self
    }

    /// Number of 5-year steps the horizon covers.
    pub fn steps(&self) -> u32 {
        self.horizon_years / STEP_YEARS
    }
}

/// Damping of the net rate as GDP per capita rises (demographic transition).
///
/// Thresholds are checked from the highest down.
pub fn transition_factor(gdp_per_capita: f64) -> f64 {
    if gdp_per_capita > HIGH_INCOME_GDP {
        HIGH_INCOME_FACTOR
    } else if gdp_per_capita > MIDDLE_INCOME_GDP {
        MIDDLE_INCOME_FACTOR
    } else {
        1.0
    }
}

/// Project a population in 5-year steps from socioeconomic indicators.
///
/// Each step advances the indicators by their scenarios, predicts absolute
/// rates (per 1000) from the new levels and compounds the net rate over the
/// step. When the models are not all loaded, or a call fails, the step uses
/// `gdp_mult - 0.008` as its yearly net rate instead.
pub fn project_by_indicators(
    request: &IndicatorRequest,
    config: &ProjectorConfig,
    predictors: &RatePredictors,
) -> Result<Projection, ProjectionError> {
    validate_seed_population(request.initial_population)?;
    request.indicators.validate()?;
    validate_horizon(request.horizon_years, config)?;

    let (gdp_scenario, gdp_effect) = config.scenarios.resolve(&request.gdp_scenario);
    let (life_scenario, life_effect) = config.scenarios.resolve(&request.life_scenario);
    let (urban_scenario, urban_effect) = config.scenarios.resolve(&request.urban_scenario);

    let use_models = predictors.all_available();
    if !use_models {
        debug!(
            available = predictors.available_count(),
            "indicator models not all loaded, using growth heuristic"
        );
    }

    info!(
        population = request.initial_population,
        gdp = %gdp_scenario,
        life = %life_scenario,
        urban = %urban_scenario,
        horizon = request.horizon_years,
        "starting indicator-driven projection"
    );

    let steps = request.steps();
    let fallback_rate = gdp_effect.gdp_mult - FALLBACK_DEATH_OFFSET;
    let mut indicators = request.indicators;
    let mut population = request.initial_population;
    let mut final_rates: Option<RateTriple> = None;
    let mut fallback_steps = 0u32;

    let mut trajectory = Vec::with_capacity(steps as usize + 1);
    trajectory.push(TrajectoryPoint::new(config.seed_year, population));

    for step in 1..=steps {
        indicators.advance(gdp_effect, life_effect, urban_effect);

        let predicted = if use_models {
            match predictors.predict_all(&indicators.features()) {
                Ok(raw) => Some(raw.sanitized()),
                Err(e) => {
                    warn!(step, error = %e, "rate prediction failed, using heuristic for this step");
                    None
                }
            }
        } else {
            None
        };

        let net_rate = match predicted {
            Some(rates) => {
                final_rates = Some(rates);
                rates.net_rate()
            }
            None => {
                fallback_steps += 1;
                fallback_rate
            }
        };
        let net_rate = net_rate * transition_factor(indicators.gdp_per_capita);

        population = (population * (1.0 + net_rate * f64::from(STEP_YEARS))).max(POPULATION_FLOOR);
        if !population.is_finite() || population >= u64::MAX as f64 {
            return Err(ProjectionError::InvalidParameters(format!(
                "projected population overflowed at step {step}"
            )));
        }

        let year = config.seed_year + (step * STEP_YEARS) as i32;
        trajectory.push(TrajectoryPoint::new(year, population));
    }

    info!(
        final_population = population.round(),
        fallback_steps, "indicator-driven projection finished"
    );

    Ok(Projection {
        trajectory,
        metadata: ProjectionMetadata::Indicators {
            scenarios: ScenarioSelection {
                gdp: gdp_scenario,
                life: life_scenario,
                urban: urban_scenario,
            },
            final_indicators: indicators,
            final_rates,
            fallback_steps,
        },
    })
}
