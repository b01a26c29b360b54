use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{validate_horizon, validate_seed_population, POPULATION_FLOOR};
use crate::config::ProjectorConfig;
use crate::error::ProjectionError;
use crate::models::{GrowthInputs, Projection, ProjectionMetadata, RateTriple, TrajectoryPoint};
use crate::predictor::{PredictorError, RatePredictors};

/// Largest reported population, as a multiple of the seed population.
pub const POPULATION_CEILING_FACTOR: f64 = 10.0;

/// Inputs of a rate-driven projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    pub initial_population: f64,
    /// Birth, death and migration rates per 1000
    pub initial_rates: RateTriple,
    /// GDP, life expectancy and urbanization growth, in percent
    pub growth: GrowthInputs,
    pub years_to_project: u32,
}

impl RateRequest {
    pub fn new(
        initial_population: f64,
        initial_rates: RateTriple,
        growth: GrowthInputs,
        years_to_project: u32,
    ) -> Self {
        Self {
            initial_population,
            initial_rates,
            growth,
            years_to_project,
        }
    }

    fn validate(&self) -> Result<(), ProjectionError> {
        validate_seed_population(self.initial_population)?;
        self.initial_rates.validate()?;
        if self.growth.features().iter().any(|g| !g.is_finite()) {
            return Err(ProjectionError::InvalidParameters(format!(
                "growth rates must be finite, got gdp={} life={} urban={}",
                self.growth.gdp, self.growth.life, self.growth.urban
            )));
        }
        Ok(())
    }
}

/// Project a population year by year from its current vital rates.
///
/// Every year the change predictors turn the growth inputs into percent
/// changes of the birth, death and migration rates. Changes and rates are
/// clamped, natural increase is capped at 35 per 1000, and the population is
/// kept between 1000 and ten times its seed. A year whose predictions fail
/// keeps the previous rates.
pub fn project_by_rates(
    request: &RateRequest,
    config: &ProjectorConfig,
    predictors: &RatePredictors,
) -> Result<Projection, ProjectionError> {
    request.validate()?;
    validate_horizon(request.years_to_project, config)?;

    if predictors.none_available() {
        return Err(ProjectionError::PredictionsUnavailable(
            "no rate change models are loaded".to_string(),
        ));
    }
    if !predictors.all_available() {
        warn!(
            available = predictors.available_count(),
            "rate change models partially loaded, rates will be held constant"
        );
    }

    info!(
        population = request.initial_population,
        gdp_growth = request.growth.gdp,
        life_growth = request.growth.life,
        urban_growth = request.growth.urban,
        years = request.years_to_project,
        "starting rate-driven projection"
    );

    let features = request.growth.features();
    let floor = POPULATION_FLOOR;
    let ceiling = (request.initial_population * POPULATION_CEILING_FACTOR).max(floor);

    let mut rates = request.initial_rates;
    let mut population = request.initial_population;
    let mut held_steps = 0u32;

    let mut trajectory = Vec::with_capacity(request.years_to_project as usize + 1);
    trajectory.push(TrajectoryPoint::new(config.seed_year, population));

    for year in 1..=request.years_to_project {
        let changes = match predictors.predict_all(&features) {
            Ok(changes) => changes.clamped_changes(),
            Err(e) => {
                held_steps += 1;
                match e {
                    PredictorError::Unavailable(_) => {
                        debug!(year, "holding rates constant")
                    }
                    _ => warn!(year, error = %e, "rate change prediction failed, holding rates constant"),
                }
                RateTriple::zero()
            }
        };

        rates = rates.apply_changes(&changes).sanitized();
        population = (population * (1.0 + rates.net_rate())).clamp(floor, ceiling);

        trajectory.push(TrajectoryPoint::new(config.seed_year + year as i32, population));
    }

    info!(
        final_population = population.round(),
        held_steps, "rate-driven projection finished"
    );

    Ok(Projection {
        trajectory,
        metadata: ProjectionMetadata::Rates {
            growth_rates: request.growth,
            final_rates: rates,
            held_steps,
        },
    })
}
