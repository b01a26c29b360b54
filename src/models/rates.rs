use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Allowed birth and death rates, per 1000 population per year.
pub const VITAL_RATE_RANGE: (f64, f64) = (5.0, 50.0);
/// Allowed net migration rate, per 1000 population per year.
pub const MIGRATION_RATE_RANGE: (f64, f64) = (-30.0, 30.0);
/// Largest natural increase (birth - death) per 1000 that is kept.
pub const MAX_NATURAL_INCREASE: f64 = 35.0;
/// Allowed yearly change of the birth and death rates, in percent.
pub const VITAL_CHANGE_RANGE: (f64, f64) = (-3.0, 3.0);
/// Allowed yearly change of the migration rate, in percent.
pub const MIGRATION_CHANGE_RANGE: (f64, f64) = (-1.0, 1.0);

/// Birth, death and migration values.
///
/// Holds absolute rates per 1000 population, or percent changes when used as
/// the output of change predictors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTriple {
    pub birth: f64,
    pub death: f64,
    pub migration: f64,
}

impl RateTriple {
    pub const fn new(birth: f64, death: f64, migration: f64) -> Self {
        Self {
            birth,
            death,
            migration,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.birth.is_finite() && self.death.is_finite() && self.migration.is_finite()
    }

    /// Clamp absolute rates into range and cap natural increase.
    pub fn sanitized(&self) -> Self {
        let mut birth = self.birth.clamp(VITAL_RATE_RANGE.0, VITAL_RATE_RANGE.1);
        let mut death = self.death.clamp(VITAL_RATE_RANGE.0, VITAL_RATE_RANGE.1);
        let migration = self
            .migration
            .clamp(MIGRATION_RATE_RANGE.0, MIGRATION_RATE_RANGE.1);

        if birth - death > MAX_NATURAL_INCREASE {
            birth = death + MAX_NATURAL_INCREASE;
        }
        if death < VITAL_RATE_RANGE.0 {
            death = VITAL_RATE_RANGE.0;
        }
        Self::new(birth, death, migration)
    }

    /// Clamp percent changes into their allowed yearly ranges.
    pub fn clamped_changes(&self) -> Self {
        Self::new(
            self.birth.clamp(VITAL_CHANGE_RANGE.0, VITAL_CHANGE_RANGE.1),
            self.death.clamp(VITAL_CHANGE_RANGE.0, VITAL_CHANGE_RANGE.1),
            self.migration
                .clamp(MIGRATION_CHANGE_RANGE.0, MIGRATION_CHANGE_RANGE.1),
        )
    }

    /// Apply percent changes multiplicatively: `rate *= 1 + change / 100`.
    pub fn apply_changes(&self, changes: &RateTriple) -> Self {
        Self::new(
            self.birth * (1.0 + changes.birth / 100.0),
            self.death * (1.0 + changes.death / 100.0),
            self.migration * (1.0 + changes.migration / 100.0),
        )
    }

    /// Birth minus death, per 1000.
    pub fn natural_increase(&self) -> f64 {
        self.birth - self.death
    }

    /// Net growth as a fraction of the population per year.
    pub fn net_rate(&self) -> f64 {
        (self.birth - self.death + self.migration) / 1000.0
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.is_finite() {
            return Err(ProjectionError::InvalidParameters(format!(
                "rates must be finite, got birth={} death={} migration={}",
                self.birth, self.death, self.migration
            )));
        }
        if self.birth < 0.0 || self.death < 0.0 {
            return Err(ProjectionError::InvalidParameters(format!(
                "birth and death rates must be non-negative, got birth={} death={}",
                self.birth, self.death
            )));
        }
        Ok(())
    }
}

impl Default for RateTriple {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_in_range_unchanged() {
        let r = RateTriple::new(20.0, 10.0, 1.5);
        assert_eq!(r.sanitized(), r);
    }

    #[test]
    fn test_sanitized_clamps_each_rate() {
        let r = RateTriple::new(80.0, 1.0, -45.0).sanitized();
        // birth clamps to 50, death to 5, then natural increase caps birth at 40
        assert_eq!(r.death, 5.0);
        assert_eq!(r.birth, 40.0);
        assert_eq!(r.migration, -30.0);
    }

    #[test]
    fn test_sanitized_caps_natural_increase() {
        let r = RateTriple::new(48.0, 6.0, 0.0).sanitized();
        assert!((r.birth - 41.0).abs() < 1e-12);
        assert!(r.natural_increase() <= MAX_NATURAL_INCREASE + 1e-12);
    }

    #[test]
    fn test_clamped_changes() {
        let c = RateTriple::new(10.0, -10.0, 5.0).clamped_changes();
        assert_eq!(c, RateTriple::new(3.0, -3.0, 1.0));
        let c = RateTriple::new(0.5, -0.5, -0.5).clamped_changes();
        assert_eq!(c, RateTriple::new(0.5, -0.5, -0.5));
    }

    #[test]
    fn test_apply_changes() {
        let r = RateTriple::new(20.0, 10.0, 2.0);
        let next = r.apply_changes(&RateTriple::new(-2.0, 1.0, 0.0));
        assert!((next.birth - 19.6).abs() < 1e-12);
        assert!((next.death - 10.1).abs() < 1e-12);
        assert!((next.migration - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_zero_changes_is_identity() {
        let r = RateTriple::new(20.0, 10.0, -3.0);
        assert_eq!(r.apply_changes(&RateTriple::zero()), r);
    }

    #[test]
    fn test_net_rate_per_unit() {
        let r = RateTriple::new(20.0, 10.0, 0.0);
        assert!((r.net_rate() - 0.01).abs() < 1e-12);
        let r = RateTriple::new(10.0, 12.0, -3.0);
        assert!((r.net_rate() + 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(RateTriple::new(20.0, 10.0, -5.0).validate().is_ok());
        assert!(RateTriple::new(-1.0, 10.0, 0.0).validate().is_err());
        assert!(RateTriple::new(20.0, -0.5, 0.0).validate().is_err());
        assert!(RateTriple::new(20.0, 10.0, f64::INFINITY).validate().is_err());
    }
}
