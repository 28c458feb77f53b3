use serde::{Deserialize, Serialize};

/// One row of the historical depreciation dataset.
///
/// `vehicle_age` is redundant with `simulation_year - year` by construction
/// of the dataset; [`VehicleRecord::age_is_consistent`] checks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Fuel_simple")]
    pub fuel: String,
    #[serde(rename = "Transmission_simple")]
    pub transmission: String,
    #[serde(rename = "Price")]
    pub price: i64,
    #[serde(rename = "Simulation_Year")]
    pub simulation_year: i32,
    #[serde(rename = "Vehicle_Age")]
    pub vehicle_age: i32,
    #[serde(rename = "Simulation_Kilometer")]
    pub simulation_kilometer: i64,
    #[serde(rename = "Estimated_Value")]
    pub estimated_value: i64,
}

impl VehicleRecord {
    pub fn age_is_consistent(&self) -> bool {
        self.vehicle_age == self.simulation_year - self.year
    }

    /// The predict-time view of this record (target dropped).
    pub fn feature_row(&self) -> FeatureRow {
        FeatureRow {
            brand: self.brand.clone(),
            year: self.year,
            fuel: self.fuel.clone(),
            transmission: self.transmission.clone(),
            price: self.price,
            simulation_year: self.simulation_year,
            vehicle_age: self.vehicle_age,
            simulation_kilometer: self.simulation_kilometer,
        }
    }
}

/// Input to `FittedPipeline::predict`. Mirrors the training record minus
/// `Model` (which only constrains defaults) and `Estimated_Value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRow {
    pub brand: String,
    pub year: i32,
    pub fuel: String,
    pub transmission: String,
    pub price: i64,
    pub simulation_year: i32,
    pub vehicle_age: i32,
    pub simulation_kilometer: i64,
}

/// User-chosen vehicle attributes, anchored at the reference year.
/// Built fresh per simulation run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub brand: String,
    pub year: i32,
    pub fuel: String,
    pub transmission: String,
    pub price: i64,
    pub kilometer: i64,
}

/// One projected point of the depreciation curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationPoint {
    pub year: i32,
    pub vehicle_age: i32,
    pub value: f64,
}
