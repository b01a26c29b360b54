use crate::config::ProjectorConfig;
use crate::error::ProjectionError;
use crate::models::{AgePyramid, CountryRecord, GrowthInputs, Projection};
use crate::predictor::RatePredictors;
use crate::projection::{
    project_age_pyramid, project_by_indicators, project_by_rates, IndicatorRequest, RateRequest,
};

/// Unified projection API holding the configuration and both model sets.
///
/// Read-only after construction, so one instance can serve concurrent callers.
#[derive(Debug)]
pub struct Projector {
    config: ProjectorConfig,
    indicator_models: RatePredictors,
    change_models: RatePredictors,
}

impl Projector {
    /// Build a projector from configuration, loading the configured linear models.
    pub fn from_config(config: ProjectorConfig) -> Self {
        let indicator_models = config.indicator_predictors();
        let change_models = config.change_predictors();
        Self::with_predictors(config, indicator_models, change_models)
    }

    /// Build a projector around externally supplied predictors.
    pub fn with_predictors(
        config: ProjectorConfig,
        indicator_models: RatePredictors,
        change_models: RatePredictors,
    ) -> Self {
        Self {
            config,
            indicator_models,
            change_models,
        }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn indicator_models(&self) -> &RatePredictors {
        &self.indicator_models
    }

    pub fn change_models(&self) -> &RatePredictors {
        &self.change_models
    }

    /// Project in 5-year steps from indicator levels and scenarios.
    pub fn project_indicators(
        &self,
        request: &IndicatorRequest,
    ) -> Result<Projection, ProjectionError> {
        project_by_indicators(request, &self.config, &self.indicator_models)
    }

    /// Project in yearly steps from vital rates and growth inputs.
    pub fn project_rates(&self, request: &RateRequest) -> Result<Projection, ProjectionError> {
        project_by_rates(request, &self.config, &self.change_models)
    }

    /// Indicator-driven projection seeded from a country record.
    pub fn project_country_indicators(
        &self,
        country: &CountryRecord,
        scenarios: (&str, &str, &str),
        horizon_years: u32,
    ) -> Result<Projection, ProjectionError> {
        let request = IndicatorRequest::new(
            country.population as f64,
            country.indicators(),
            horizon_years,
        )
        .with_scenarios(scenarios.0, scenarios.1, scenarios.2);
        self.project_indicators(&request)
    }

    /// Rate-driven projection seeded from a country record.
    pub fn project_country_rates(
        &self,
        country: &CountryRecord,
        growth: GrowthInputs,
        years: u32,
    ) -> Result<Projection, ProjectionError> {
        let request = RateRequest::new(country.population as f64, country.rates(), growth, years);
        self.project_rates(&request)
    }

    /// Age a country's pyramid to the given calendar year using its recorded rates.
    pub fn country_pyramid_for_year(
        &self,
        country: &CountryRecord,
        year: i32,
    ) -> Result<AgePyramid, ProjectionError> {
        let years_ahead = year
            .checked_sub(self.config.seed_year)
            .and_then(|diff| u32::try_from(diff).ok())
            .ok_or_else(|| {
                ProjectionError::InvalidParameters(format!(
                    "year {year} is before the seed year {}",
                    self.config.seed_year
                ))
            })?;
        self.country_pyramid_ahead(country, years_ahead)
            .map(|(_, pyramid)| pyramid)
    }

    /// Age a country's pyramid `years_ahead` years past the seed year.
    ///
    /// Returns the calendar year reached along with the pyramid.
    pub fn country_pyramid_ahead(
        &self,
        country: &CountryRecord,
        years_ahead: u32,
    ) -> Result<(i32, AgePyramid), ProjectionError> {
        let year = self.config.year_after_seed(years_ahead).ok_or_else(|| {
            ProjectionError::InvalidParameters(format!(
                "{years_ahead} years after seed year {} is not a valid calendar year",
                self.config.seed_year
            ))
        })?;
        let rates = country.rates();
        let pyramid =
            project_age_pyramid(&country.pyramid()?, years_ahead, rates.birth, rates.death)?;
        Ok((year, pyramid))
    }
}
