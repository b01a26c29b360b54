use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AgePyramid, IndicatorVector, RateTriple};
use crate::error::ProjectionError;

/// Birth rate used when a country record has none, per 1000.
pub const DEFAULT_BIRTH_RATE: f64 = 20.0;
/// Death rate used when a country record has none, per 1000.
pub const DEFAULT_DEATH_RATE: f64 = 10.0;
/// Migration rate used when a country record has none, per 1000.
pub const DEFAULT_MIGRATION_RATE: f64 = 0.0;

/// Seed data for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub population: u64,
    pub male_pyramid_data: Vec<f64>,
    pub female_pyramid_data: Vec<f64>,
    pub gdp_per_capita: f64,
    pub life_expectancy: f64,
    pub urbanization: f64,
    #[serde(default)]
    pub birth_rate: Option<f64>,
    #[serde(default)]
    pub death_rate: Option<f64>,
    #[serde(default)]
    pub migration_rate: Option<f64>,
}

impl CountryRecord {
    pub fn indicators(&self) -> IndicatorVector {
        IndicatorVector::new(self.gdp_per_capita, self.life_expectancy, self.urbanization)
    }

    /// Recorded rates per 1000, with defaults for the ones that are missing.
    pub fn rates(&self) -> RateTriple {
        RateTriple::new(
            self.birth_rate.unwrap_or(DEFAULT_BIRTH_RATE),
            self.death_rate.unwrap_or(DEFAULT_DEATH_RATE),
            self.migration_rate.unwrap_or(DEFAULT_MIGRATION_RATE),
        )
    }

    pub fn pyramid(&self) -> Result<AgePyramid, ProjectionError> {
        AgePyramid::from_slices(&self.male_pyramid_data, &self.female_pyramid_data)
    }

    pub fn validate(&self, name: &str) -> Result<(), ProjectionError> {
        let context = |e: ProjectionError| {
            ProjectionError::ValidationError(format!("country '{name}': {}", inner_message(&e)))
        };
        if self.population == 0 {
            return Err(ProjectionError::ValidationError(format!(
                "country '{name}': population must be positive"
            )));
        }
        self.indicators().validate().map_err(context)?;
        self.rates().validate().map_err(context)?;
        self.pyramid().map_err(context)?;
        Ok(())
    }
}

fn inner_message(e: &ProjectionError) -> String {
    match e {
        ProjectionError::InvalidParameters(msg) | ProjectionError::ValidationError(msg) => {
            msg.clone()
        }
        other => other.to_string(),
    }
}

/// Read-only lookup of country records keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryStore {
    countries: HashMap<String, CountryRecord>,
}

impl CountryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store, validating every record and lower-casing the names.
    pub fn from_records(
        records: impl IntoIterator<Item = (String, CountryRecord)>,
    ) -> Result<Self, ProjectionError> {
        let mut countries = HashMap::new();
        for (name, record) in records {
            record.validate(&name)?;
            let key = name.trim().to_lowercase();
            if countries.insert(key, record).is_some() {
                return Err(ProjectionError::ValidationError(format!(
                    "duplicate country entry '{name}'"
                )));
            }
        }
        Ok(Self { countries })
    }

    pub fn get(&self, name: &str) -> Result<&CountryRecord, ProjectionError> {
        self.countries
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| ProjectionError::CountryNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.countries.contains_key(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Country names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.countries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
