use serde::{Deserialize, Serialize};

use super::{PredictorError, RateKind, RatePredictor, RatePredictors};

/// Linear regression: `rate = intercept + coefficients · features`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRatePredictor {
    pub intercept: f64,
    pub coefficients: [f64; 3],
}

impl LinearRatePredictor {
    pub const fn new(intercept: f64, coefficients: [f64; 3]) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }
}

impl RatePredictor for LinearRatePredictor {
    fn predict(&self, features: &[f64; 3]) -> Result<f64, PredictorError> {
        if features.iter().any(|f| !f.is_finite()) {
            return Err(PredictorError::Failed(format!(
                "non-finite feature vector {features:?}"
            )));
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}

/// Serialized form of the three linear models; missing entries stay unloaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModelSet {
    #[serde(default)]
    pub birth: Option<LinearRatePredictor>,
    #[serde(default)]
    pub death: Option<LinearRatePredictor>,
    #[serde(default)]
    pub migration: Option<LinearRatePredictor>,
}

impl LinearModelSet {
    pub fn is_empty(&self) -> bool {
        self.birth.is_none() && self.death.is_none() && self.migration.is_none()
    }

    pub fn validate(&self) -> Result<(), crate::error::ProjectionError> {
        let models = [
            (RateKind::Birth, &self.birth),
            (RateKind::Death, &self.death),
            (RateKind::Migration, &self.migration),
        ];
        for (kind, model) in models {
            if let Some(m) = model {
                if !m.intercept.is_finite() || m.coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(crate::error::ProjectionError::Config(format!(
                        "{kind} model has non-finite coefficients"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn to_predictors(&self) -> RatePredictors {
        let boxed = |m: &Option<LinearRatePredictor>| {
            m.map(|p| Box::new(p) as Box<dyn RatePredictor>)
        };
        RatePredictors::new(
            boxed(&self.birth),
            boxed(&self.death),
            boxed(&self.migration),
        )
    }
}
