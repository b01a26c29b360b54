pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod predictor;
pub mod projection;
pub mod visualization;

pub use config::ProjectorConfig;
pub use error::ProjectionError;
pub use io::{read_countries_json, write_projection_json};
pub use models::{
    AgePyramid, CountryRecord, CountryStore, GrowthInputs, IndicatorVector, Projection,
    RateTriple, Scenario, ScenarioTable, TrajectoryPoint,
};
pub use predictor::{LinearRatePredictor, PredictorError, RatePredictor, RatePredictors};
pub use projection::{IndicatorRequest, Projector, RateRequest};
