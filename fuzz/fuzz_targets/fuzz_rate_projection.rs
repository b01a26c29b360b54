#![no_main]

use libfuzzer_sys::fuzz_target;
use population_projector::{
    models::{GrowthInputs, RateTriple},
    predictor::RatePredictors,
    projection::{project_by_rates, POPULATION_FLOOR},
    ProjectorConfig, RateRequest,
};

fn f64_at(data: &[u8], index: usize) -> f64 {
    let start = index * 8;
    match data.get(start..start + 8) {
        Some(bytes) => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(bytes);
            f64::from_le_bytes(buf)
        }
        None => 0.0,
    }
}

fuzz_target!(|data: &[u8]| {
    let values: Vec<f64> = (0..10).map(|i| f64_at(data, i)).collect();
    let years = data.last().copied().unwrap_or(0) as u32 % 101;

    let request = RateRequest::new(
        values[0],
        RateTriple::new(values[1], values[2], values[3]),
        GrowthInputs {
            gdp: values[4],
            life: values[5],
            urban: values[6],
        },
        years,
    );
    let predictors = RatePredictors::constant(values[7], values[8], values[9]);

    if let Ok(projection) = project_by_rates(&request, &ProjectorConfig::default(), &predictors) {
        assert_eq!(projection.len(), years as usize + 1);
        for point in &projection.trajectory[1..] {
            assert!(point.population as f64 >= POPULATION_FLOOR);
        }
    }
});
