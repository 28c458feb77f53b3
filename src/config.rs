//! Configuration for carcast.
//!
//! All settings come from environment variables with sensible defaults, so
//! both binaries run out of the box against `data/`. Load a `.env` file via
//! `dotenvy` before calling `from_env`.

use std::env;
use std::path::PathBuf;

/// Parameters of the depreciation projection.
///
/// The reference year anchors the user's "current" price and kilometre
/// inputs; the projection always starts one year after it.
#[derive(Debug, Clone)]
pub struct SimulationEnvConfig {
    pub reference_year: i32,
    pub horizon_years: u32,
    pub annual_kilometers: i64,
}

impl SimulationEnvConfig {
    pub fn from_env() -> Self {
        let reference_year = env::var("SIMULATION_REFERENCE_YEAR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2025);

        let horizon_years = env::var("SIMULATION_HORIZON_YEARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        let annual_kilometers = env::var("SIMULATION_ANNUAL_KILOMETERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5777); // Assumed yearly mileage of an average car

        Self {
            reference_year,
            horizon_years,
            annual_kilometers,
        }
    }
}

impl Default for SimulationEnvConfig {
    fn default() -> Self {
        Self {
            reference_year: 2025,
            horizon_years: 20,
            annual_kilometers: 5777,
        }
    }
}

/// Top-level application configuration: input locations plus simulation
/// parameters.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub simulation: SimulationEnvConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let dataset_path = env::var("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/depreciated-clear.csv"));

        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/model_valuation.json"));

        Self {
            dataset_path,
            model_path,
            simulation: SimulationEnvConfig::from_env(),
        }
    }
}
