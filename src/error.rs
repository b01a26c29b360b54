use thiserror::Error;

/// Errors that can occur while loading inputs or running a projection.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Predictions unavailable: {0}")]
    PredictionsUnavailable(String),

    #[error("Country not found: {0}")]
    CountryNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
