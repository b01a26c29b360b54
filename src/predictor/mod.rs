mod linear;

use thiserror::Error;

use crate::models::RateTriple;

pub use linear::{LinearModelSet, LinearRatePredictor};

/// Which of the three demographic rates a predictor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    Birth,
    Death,
    Migration,
}

impl std::fmt::Display for RateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateKind::Birth => write!(f, "birth"),
            RateKind::Death => write!(f, "death"),
            RateKind::Migration => write!(f, "migration"),
        }
    }
}

/// Failure of a single prediction. Recovered by the projector, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictorError {
    #[error("{0} predictor is not loaded")]
    Unavailable(RateKind),

    #[error("{kind} predictor returned a non-finite value: {value}")]
    NonFinite { kind: RateKind, value: f64 },

    #[error("prediction failed: {0}")]
    Failed(String),
}

/// A regression model mapping a 3-element feature vector to one rate.
///
/// Implementations must not mutate shared state while predicting; one
/// instance is shared by every projection that runs concurrently.
pub trait RatePredictor: Send + Sync {
    fn predict(&self, features: &[f64; 3]) -> Result<f64, PredictorError>;
}

impl<F> RatePredictor for F
where
    F: Fn(&[f64; 3]) -> Result<f64, PredictorError> + Send + Sync,
{
    fn predict(&self, features: &[f64; 3]) -> Result<f64, PredictorError> {
        self(features)
    }
}

/// Predictor that ignores its features and always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRatePredictor(pub f64);

impl RatePredictor for ConstantRatePredictor {
    fn predict(&self, _features: &[f64; 3]) -> Result<f64, PredictorError> {
        Ok(self.0)
    }
}

type BoxedPredictor = Box<dyn RatePredictor>;

/// The birth, death and migration predictors handed to a projection.
///
/// Any of the three may be absent; projections check availability up front
/// instead of relying on a failed call.
#[derive(Default)]
pub struct RatePredictors {
    birth: Option<BoxedPredictor>,
    death: Option<BoxedPredictor>,
    migration: Option<BoxedPredictor>,
}

impl RatePredictors {
    pub fn new(
        birth: Option<BoxedPredictor>,
        death: Option<BoxedPredictor>,
        migration: Option<BoxedPredictor>,
    ) -> Self {
        Self {
            birth,
            death,
            migration,
        }
    }

    /// A set with no predictors loaded.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// A set of three constant predictors.
    pub fn constant(birth: f64, death: f64, migration: f64) -> Self {
        Self::new(
            Some(Box::new(ConstantRatePredictor(birth))),
            Some(Box::new(ConstantRatePredictor(death))),
            Some(Box::new(ConstantRatePredictor(migration))),
        )
    }

    pub fn with(mut self, kind: RateKind, predictor: impl RatePredictor + 'static) -> Self {
        let slot = Some(Box::new(predictor) as BoxedPredictor);
        match kind {
            RateKind::Birth => self.birth = slot,
            RateKind::Death => self.death = slot,
            RateKind::Migration => self.migration = slot,
        }
        self
    }

    pub fn without(mut self, kind: RateKind) -> Self {
        match kind {
            RateKind::Birth => self.birth = None,
            RateKind::Death => self.death = None,
            RateKind::Migration => self.migration = None,
        }
        self
    }

    fn slot(&self, kind: RateKind) -> Option<&BoxedPredictor> {
        match kind {
            RateKind::Birth => self.birth.as_ref(),
            RateKind::Death => self.death.as_ref(),
            RateKind::Migration => self.migration.as_ref(),
        }
    }

    pub fn is_available(&self, kind: RateKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn available_count(&self) -> usize {
        [RateKind::Birth, RateKind::Death, RateKind::Migration]
            .iter()
            .filter(|k| self.is_available(**k))
            .count()
    }

    pub fn all_available(&self) -> bool {
        self.available_count() == 3
    }

    pub fn none_available(&self) -> bool {
        self.available_count() == 0
    }

    /// Query one predictor; non-finite outputs count as failures.
    pub fn predict(&self, kind: RateKind, features: &[f64; 3]) -> Result<f64, PredictorError> {
        let predictor = self.slot(kind).ok_or(PredictorError::Unavailable(kind))?;
        let value = predictor.predict(features)?;
        if !value.is_finite() {
            return Err(PredictorError::NonFinite { kind, value });
        }
        Ok(value)
    }

    /// Query all three predictors. Fails as a batch if any one of them fails.
    pub fn predict_all(&self, features: &[f64; 3]) -> Result<RateTriple, PredictorError> {
        Ok(RateTriple::new(
            self.predict(RateKind::Birth, features)?,
            self.predict(RateKind::Death, features)?,
            self.predict(RateKind::Migration, features)?,
        ))
    }
}

impl std::fmt::Debug for RatePredictors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatePredictors")
            .field("birth", &self.birth.is_some())
            .field("death", &self.death.is_some())
            .field("migration", &self.migration.is_some())
            .finish()
    }
}
