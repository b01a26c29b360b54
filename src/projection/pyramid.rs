use crate::error::ProjectionError;
use crate::models::{AgePyramid, NUM_BRACKETS};

/// Share of births that are male.
pub const MALE_BIRTH_SHARE: f64 = 0.51;

const BRACKET_YEARS: u32 = 10;
/// Brackets 20-29 through 50-59 contribute births.
const REPRODUCTIVE_BRACKETS: std::ops::Range<usize> = 2..6;

/// Age a population pyramid forward by `years_ahead` years.
///
/// Cohorts move up one bracket per full decade and are thinned by the yearly
/// death rate. The vacated youngest brackets are refilled with births from the
/// 20-59 cohorts. Projections shorter than a decade, or long enough to push
/// every cohort off the top bracket, return the pyramid unchanged.
pub fn project_age_pyramid(
    pyramid: &AgePyramid,
    years_ahead: u32,
    birth_rate: f64,
    death_rate: f64,
) -> Result<AgePyramid, ProjectionError> {
    for (name, rate) in [("birth", birth_rate), ("death", death_rate)] {
        if !rate.is_finite() || !(0.0..=1000.0).contains(&rate) {
            return Err(ProjectionError::InvalidParameters(format!(
                "{name} rate must be in 0..=1000 per 1000, got {rate}"
            )));
        }
    }

    let shift = (years_ahead / BRACKET_YEARS) as usize;
    if shift == 0 || shift >= NUM_BRACKETS {
        return Ok(pyramid.clone());
    }

    let years = f64::from(years_ahead);
    let survival = (1.0 - death_rate / 1000.0).powf(years);

    let mut male = [0.0; NUM_BRACKETS];
    let mut female = [0.0; NUM_BRACKETS];
    for i in 0..NUM_BRACKETS - shift {
        male[i + shift] = pyramid.male[i] * survival;
        female[i + shift] = pyramid.female[i] * survival;
    }

    let reproductive: f64 = pyramid.male[REPRODUCTIVE_BRACKETS].iter().sum::<f64>()
        + pyramid.female[REPRODUCTIVE_BRACKETS].iter().sum::<f64>();
    if reproductive > 0.0 {
        let births = reproductive * (birth_rate / 1000.0) * years;
        let per_bracket = births / shift as f64;
        for i in 0..shift {
            male[i] = per_bracket * MALE_BIRTH_SHARE;
            female[i] = per_bracket * (1.0 - MALE_BIRTH_SHARE);
        }
    }

    Ok(AgePyramid::new(male, female))
}
