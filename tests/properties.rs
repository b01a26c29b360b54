use proptest::prelude::*;

use population_projector::{
    models::{GrowthInputs, IndicatorVector, ProjectionMetadata, RateTriple, MAX_NATURAL_INCREASE},
    predictor::RatePredictors,
    projection::{project_by_indicators, project_by_rates, POPULATION_FLOOR},
    IndicatorRequest, ProjectorConfig, RateRequest,
};

const SCENARIOS: [&str; 6] = ["high", "medium", "low", "stagnant", "decline", "unknown"];

fn scenario() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&SCENARIOS[..])
}

fn rates() -> impl Strategy<Value = RateTriple> {
    (0.0f64..80.0, 0.0f64..80.0, -50.0f64..50.0)
        .prop_map(|(birth, death, migration)| RateTriple::new(birth, death, migration))
}

fn growth() -> impl Strategy<Value = GrowthInputs> {
    (-10.0f64..10.0, -5.0f64..5.0, -5.0f64..5.0)
        .prop_map(|(gdp, life, urban)| GrowthInputs { gdp, life, urban })
}

proptest! {
    #[test]
    fn sanitized_rates_stay_in_bounds(rates in rates(), changes in rates()) {
        let next = rates.apply_changes(&changes.clamped_changes()).sanitized();
        prop_assert!((5.0..=50.0).contains(&next.birth));
        prop_assert!((5.0..=50.0).contains(&next.death));
        prop_assert!((-30.0..=30.0).contains(&next.migration));
        prop_assert!(next.natural_increase() <= MAX_NATURAL_INCREASE + 1e-9);
    }

    #[test]
    fn indicator_trajectory_shape_and_floor(
        seed in 1.0f64..5e8,
        gdp in 100.0f64..150_000.0,
        life in 30.0f64..90.0,
        urban in 0.0f64..100.0,
        scenarios in (scenario(), scenario(), scenario()),
        horizon in 0u32..=100,
        model_rates in prop::option::of(rates()),
    ) {
        let config = ProjectorConfig::default();
        let predictors = match model_rates {
            Some(r) => RatePredictors::constant(r.birth, r.death, r.migration),
            None => RatePredictors::unavailable(),
        };
        let req = IndicatorRequest::new(seed, IndicatorVector::new(gdp, life, urban), horizon)
            .with_scenarios(scenarios.0, scenarios.1, scenarios.2);
        let proj = project_by_indicators(&req, &config, &predictors).unwrap();

        prop_assert_eq!(proj.len(), (horizon / 5 + 1) as usize);
        prop_assert_eq!(proj.trajectory[0].population, seed.round() as u64);
        for point in &proj.trajectory[1..] {
            prop_assert!(point.population as f64 >= POPULATION_FLOOR);
        }
    }

    #[test]
    fn rate_trajectory_bounded(
        seed in 1.0f64..5e8,
        initial in rates(),
        growth in growth(),
        changes in (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
        years in 0u32..=100,
    ) {
        let config = ProjectorConfig::default();
        let predictors = RatePredictors::constant(changes.0, changes.1, changes.2);
        let req = RateRequest::new(seed, initial, growth, years);
        let proj = project_by_rates(&req, &config, &predictors).unwrap();

        prop_assert_eq!(proj.len(), years as usize + 1);
        prop_assert_eq!(proj.trajectory[0].population, seed.round() as u64);
        let ceiling = (seed * 10.0).max(POPULATION_FLOOR).round();
        for point in &proj.trajectory[1..] {
            prop_assert!(point.population as f64 >= POPULATION_FLOOR);
            prop_assert!(point.population as f64 <= ceiling);
        }
    }

    #[test]
    fn natural_increase_capped_every_year(
        initial in rates(),
        growth in growth(),
        changes in (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
        years in 1u32..=30,
    ) {
        let config = ProjectorConfig::default();
        let predictors = RatePredictors::constant(changes.0, changes.1, changes.2);
        for year in 1..=years {
            let req = RateRequest::new(1_000_000.0, initial, growth, year);
            let proj = project_by_rates(&req, &config, &predictors).unwrap();
            match proj.metadata {
                ProjectionMetadata::Rates { final_rates, .. } => {
                    prop_assert!(final_rates.natural_increase() <= MAX_NATURAL_INCREASE + 1e-9);
                }
                other => prop_assert!(false, "unexpected metadata: {:?}", other),
            }
        }
    }

    #[test]
    fn projections_are_deterministic(
        seed in 1000.0f64..1e8,
        gdp in 100.0f64..150_000.0,
        scenarios in (scenario(), scenario(), scenario()),
        horizon in 0u32..=100,
    ) {
        let config = ProjectorConfig::default();
        let predictors = RatePredictors::constant(22.0, 9.0, 1.5);
        let req = IndicatorRequest::new(seed, IndicatorVector::new(gdp, 70.0, 50.0), horizon)
            .with_scenarios(scenarios.0, scenarios.1, scenarios.2);
        let first = project_by_indicators(&req, &config, &predictors).unwrap();
        let second = project_by_indicators(&req, &config, &predictors).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_scenario_equals_medium(
        name in "[a-z]{1,12}",
        seed in 1000.0f64..1e8,
        gdp in 100.0f64..150_000.0,
    ) {
        prop_assume!(!["high", "medium", "low", "stagnant", "decline"].contains(&name.as_str()));
        let config = ProjectorConfig::default();
        let predictors = RatePredictors::unavailable();
        let indicators = IndicatorVector::new(gdp, 70.0, 50.0);

        let unknown = IndicatorRequest::new(seed, indicators, 50)
            .with_scenarios(&name, &name, &name);
        let medium = IndicatorRequest::new(seed, indicators, 50);
        prop_assert_eq!(
            project_by_indicators(&unknown, &config, &predictors).unwrap(),
            project_by_indicators(&medium, &config, &predictors).unwrap()
        );
    }
}
