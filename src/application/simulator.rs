use crate::application::ml::ValueEstimator;
use crate::config::SimulationEnvConfig;
use crate::domain::errors::PipelineError;
use crate::domain::vehicle::{FeatureRow, SimulationRequest, ValuationPoint};
use tracing::debug;

/// Project a vehicle's value over the configured horizon.
///
/// Simulated years run from `reference_year + 1` through
/// `reference_year + horizon_years`, one prediction each. Mileage grows by
/// `annual_kilometers` per year since the reference year; a prediction
/// failure aborts the whole projection.
pub fn project_values(
    request: &SimulationRequest,
    estimator: &dyn ValueEstimator,
    config: &SimulationEnvConfig,
) -> Result<Vec<ValuationPoint>, PipelineError> {
    let mut points = Vec::with_capacity(config.horizon_years as usize);

    for offset in 1..=config.horizon_years as i32 {
        let simulation_year = config.reference_year + offset;
        let age_since_reference = simulation_year - config.reference_year;

        // Mileage only accrues forward of the reference year.
        let simulation_kilometer = if age_since_reference >= 0 {
            request.kilometer + age_since_reference as i64 * config.annual_kilometers
        } else {
            request.kilometer
        };

        let row = FeatureRow {
            brand: request.brand.clone(),
            year: request.year,
            fuel: request.fuel.clone(),
            transmission: request.transmission.clone(),
            price: request.price,
            simulation_year,
            vehicle_age: simulation_year - request.year,
            simulation_kilometer,
        };

        let value = estimator.predict(&row)?;
        debug!(
            "Projected {} {}: year={}, age={}, km={}, value={:.0}",
            row.brand, request.year, simulation_year, row.vehicle_age, simulation_kilometer, value
        );

        points.push(ValuationPoint {
            year: simulation_year,
            vehicle_age: row.vehicle_age,
            value,
        });
    }

    Ok(points)
}
