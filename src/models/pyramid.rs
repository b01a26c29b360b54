use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Ten-year age brackets, youngest first.
pub const AGE_BRACKETS: [&str; 11] = [
    "0-9", "10-19", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80-89", "90-99",
    "100+",
];

pub const NUM_BRACKETS: usize = AGE_BRACKETS.len();

/// Allowed distance of the pyramid total from 100 percent.
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// Male and female shares of the population per age bracket, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgePyramid {
    pub male: [f64; NUM_BRACKETS],
    pub female: [f64; NUM_BRACKETS],
}

/// Summary figures of an [`AgePyramid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidStats {
    pub male_total: f64,
    pub female_total: f64,
    pub total: f64,
    /// Share of ages 0-19 in the total, in percent
    pub youth_ratio: f64,
}

impl AgePyramid {
    pub fn new(male: [f64; NUM_BRACKETS], female: [f64; NUM_BRACKETS]) -> Self {
        Self { male, female }
    }

    /// Build a pyramid from slices, which must each hold exactly one value per bracket.
    pub fn from_slices(male: &[f64], female: &[f64]) -> Result<Self, ProjectionError> {
        let male: [f64; NUM_BRACKETS] = male.try_into().map_err(|_| {
            ProjectionError::ValidationError(format!(
                "expected {NUM_BRACKETS} male age brackets, got {}",
                male.len()
            ))
        })?;
        let female: [f64; NUM_BRACKETS] = female.try_into().map_err(|_| {
            ProjectionError::ValidationError(format!(
                "expected {NUM_BRACKETS} female age brackets, got {}",
                female.len()
            ))
        })?;
        Ok(Self { male, female })
    }

    pub fn total(&self) -> f64 {
        self.male.iter().sum::<f64>() + self.female.iter().sum::<f64>()
    }

    pub fn stats(&self) -> PyramidStats {
        let male_total: f64 = self.male.iter().sum();
        let female_total: f64 = self.female.iter().sum();
        let total = male_total + female_total;
        let youth = self.male[0] + self.male[1] + self.female[0] + self.female[1];
        let youth_ratio = if total > 0.0 {
            youth / total * 100.0
        } else {
            0.0
        };
        PyramidStats {
            male_total,
            female_total,
            total,
            youth_ratio,
        }
    }

    /// Check that all shares are non-negative and add up to 100 percent.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        for (i, (m, f)) in self.male.iter().zip(self.female.iter()).enumerate() {
            if !m.is_finite() || !f.is_finite() || *m < 0.0 || *f < 0.0 {
                return Err(ProjectionError::ValidationError(format!(
                    "age bracket {} must hold non-negative percentages, got male={m} female={f}",
                    AGE_BRACKETS[i]
                )));
            }
        }
        let total = self.total();
        if (total - 100.0).abs() > TOTAL_TOLERANCE {
            return Err(ProjectionError::ValidationError(format!(
                "population percentages must add up to 100, current total: {total:.2}"
            )));
        }
        Ok(())
    }
}
