mod indicator_driven;
mod projector;
mod pyramid;
mod rate_driven;

pub use indicator_driven::{
    project_by_indicators, transition_factor, IndicatorRequest, FALLBACK_DEATH_OFFSET,
    STEP_YEARS,
};
pub use projector::Projector;
pub use pyramid::{project_age_pyramid, MALE_BIRTH_SHARE};
pub use rate_driven::{project_by_rates, RateRequest, POPULATION_CEILING_FACTOR};

use crate::config::{ProjectorConfig, HORIZON_LIMIT_YEARS};
use crate::error::ProjectionError;

/// Smallest population a projection will report.
pub const POPULATION_FLOOR: f64 = 1000.0;

/// Largest seed population a projection accepts.
pub const MAX_SEED_POPULATION: f64 = 1e11;

fn validate_seed_population(population: f64) -> Result<(), ProjectionError> {
    if !population.is_finite() || population <= 0.0 {
        return Err(ProjectionError::InvalidParameters(format!(
            "initial population must be positive, got {population}"
        )));
    }
    if population > MAX_SEED_POPULATION {
        return Err(ProjectionError::InvalidParameters(format!(
            "initial population {population} exceeds the maximum of {MAX_SEED_POPULATION}"
        )));
    }
    Ok(())
}

fn validate_horizon(years: u32, config: &ProjectorConfig) -> Result<(), ProjectionError> {
    let max_years = config.max_horizon_years.min(HORIZON_LIMIT_YEARS);
    if years > max_years {
        return Err(ProjectionError::InvalidParameters(format!(
            "horizon of {years} years exceeds the maximum of {max_years} years"
        )));
    }
    if config.year_after_seed(years).is_none() {
        return Err(ProjectionError::InvalidParameters(format!(
            "horizon of {years} years from seed year {} overflows the calendar",
            config.seed_year
        )));
    }
    Ok(())
}
