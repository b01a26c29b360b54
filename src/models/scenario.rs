use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named growth assumption applied to the indicators at every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    High,
    Medium,
    Low,
    Stagnant,
    Decline,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::High,
        Scenario::Medium,
        Scenario::Low,
        Scenario::Stagnant,
        Scenario::Decline,
    ];

    /// Resolve a scenario name, falling back to `Medium` for unknown names.
    ///
    /// Unknown names are accepted on purpose so callers can pass free-form
    /// user input; the fallback is logged at debug level.
    pub fn lookup(name: &str) -> Scenario {
        name.parse().unwrap_or_else(|_| {
            debug!(scenario = name, "unknown scenario name, using medium");
            Scenario::Medium
        })
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::High => write!(f, "high"),
            Scenario::Medium => write!(f, "medium"),
            Scenario::Low => write!(f, "low"),
            Scenario::Stagnant => write!(f, "stagnant"),
            Scenario::Decline => write!(f, "decline"),
        }
    }
}

impl std::str::FromStr for Scenario {
    type Err = crate::error::ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Scenario::High),
            "medium" => Ok(Scenario::Medium),
            "low" => Ok(Scenario::Low),
            "stagnant" => Ok(Scenario::Stagnant),
            "decline" => Ok(Scenario::Decline),
            _ => Err(crate::error::ProjectionError::InvalidParameters(format!(
                "Unknown scenario: '{s}'"
            ))),
        }
    }
}

/// Per-step effect of a scenario on each indicator.
///
/// GDP is compounded (`gdp *= 1 + gdp_mult`), life expectancy and
/// urbanization are shifted additively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEffect {
    pub gdp_mult: f64,
    pub life_delta: f64,
    pub urban_delta: f64,
}

impl ScenarioEffect {
    pub const fn new(gdp_mult: f64, life_delta: f64, urban_delta: f64) -> Self {
        Self {
            gdp_mult,
            life_delta,
            urban_delta,
        }
    }
}

/// Immutable table of scenario effects, one entry per [`Scenario`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioTable {
    pub high: ScenarioEffect,
    pub medium: ScenarioEffect,
    pub low: ScenarioEffect,
    pub stagnant: ScenarioEffect,
    pub decline: ScenarioEffect,
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self {
            high: ScenarioEffect::new(0.03, 1.5, 2.0),
            medium: ScenarioEffect::new(0.02, 1.0, 1.0),
            low: ScenarioEffect::new(0.01, 0.5, 0.5),
            stagnant: ScenarioEffect::new(0.0, 0.0, 0.0),
            decline: ScenarioEffect::new(-0.01, -0.5, -0.5),
        }
    }
}

impl ScenarioTable {
    pub fn get(&self, scenario: Scenario) -> &ScenarioEffect {
        match scenario {
            Scenario::High => &self.high,
            Scenario::Medium => &self.medium,
            Scenario::Low => &self.low,
            Scenario::Stagnant => &self.stagnant,
            Scenario::Decline => &self.decline,
        }
    }

    /// Look up a scenario by name; unknown names resolve to the medium entry.
    pub fn resolve(&self, name: &str) -> (Scenario, &ScenarioEffect) {
        let scenario = Scenario::lookup(name);
        (scenario, self.get(scenario))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &ScenarioEffect)> {
        Scenario::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn validate(&self) -> Result<(), crate::error::ProjectionError> {
        for (scenario, effect) in self.iter() {
            let values = [effect.gdp_mult, effect.life_delta, effect.urban_delta];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(crate::error::ProjectionError::Config(format!(
                    "scenario '{scenario}' has a non-finite effect"
                )));
            }
            if effect.gdp_mult <= -1.0 {
                return Err(crate::error::ProjectionError::Config(format!(
                    "scenario '{scenario}': gdp_mult must be greater than -1.0, got {}",
                    effect.gdp_mult
                )));
            }
        }
        Ok(())
    }
}
