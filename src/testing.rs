//! Shared test fixtures.

use crate::domain::vehicle::VehicleRecord;

/// A consistent record (age invariant holds) with fixed numerics.
pub fn record_with(
    brand: &str,
    model: &str,
    year: i32,
    fuel: &str,
    transmission: &str,
) -> VehicleRecord {
    let simulation_year = year + 4;
    VehicleRecord {
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        fuel: fuel.to_string(),
        transmission: transmission.to_string(),
        price: 150_000_000,
        simulation_year,
        vehicle_age: simulation_year - year,
        simulation_kilometer: 80_000,
        estimated_value: 110_000_000,
    }
}

/// Synthetic training set with a learnable depreciation signal.
///
/// Values fall linearly with age and mileage; the age invariant
/// `vehicle_age == simulation_year - year` holds for every row.
pub fn synthetic_records(n: usize) -> Vec<VehicleRecord> {
    let brands = ["Toyota", "Honda", "Suzuki"];
    let models = ["Avanza", "Jazz", "Ertiga"];
    let fuels = ["Bensin", "Diesel"];
    let transmissions = ["Manual", "Automatic"];

    (0..n)
        .map(|i| {
            let year = 2015 + (i % 8) as i32;
            let age = 1 + (i % 10) as i32;
            let simulation_year = year + age;
            let price = 120_000_000 + (i % 5) as i64 * 30_000_000;
            let kilometer = age as i64 * 12_000;
            let value = (price - age as i64 * 9_000_000 - kilometer * 100).max(10_000_000);

            VehicleRecord {
                brand: brands[i % brands.len()].to_string(),
                model: models[i % models.len()].to_string(),
                year,
                fuel: fuels[i % fuels.len()].to_string(),
                transmission: transmissions[i % transmissions.len()].to_string(),
                price,
                simulation_year,
                vehicle_age: age,
                simulation_kilometer: kilometer,
                estimated_value: value,
            }
        })
        .collect()
}
