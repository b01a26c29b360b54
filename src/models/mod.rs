mod country;
mod indicators;
mod pyramid;
mod rates;
mod scenario;
mod trajectory;

pub use country::{
    CountryRecord, CountryStore, DEFAULT_BIRTH_RATE, DEFAULT_DEATH_RATE, DEFAULT_MIGRATION_RATE,
};
pub use indicators::{IndicatorVector, LIFE_EXPECTANCY_RANGE, URBANIZATION_RANGE};
pub use pyramid::{AgePyramid, PyramidStats, AGE_BRACKETS, NUM_BRACKETS, TOTAL_TOLERANCE};
pub use rates::{
    RateTriple, MAX_NATURAL_INCREASE, MIGRATION_CHANGE_RANGE, MIGRATION_RATE_RANGE,
    VITAL_CHANGE_RANGE, VITAL_RATE_RANGE,
};
pub use scenario::{Scenario, ScenarioEffect, ScenarioTable};
pub use trajectory::{
    GrowthInputs, Projection, ProjectionMetadata, ScenarioSelection, TrajectoryPoint,
};
