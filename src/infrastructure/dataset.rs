use crate::domain::errors::DataError;
use crate::domain::vehicle::VehicleRecord;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// The historical depreciation dataset, loaded once and read-only after.
///
/// Serves both halves of the system: the trainer fits on `records()`, the
/// simulator reads choice lists and per-(brand, model) templates.
pub struct Dataset {
    records: Vec<VehicleRecord>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            return Err(DataError::DatasetMissing {
                path: path.display().to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::DatasetRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: VehicleRecord = row.map_err(|e| DataError::DatasetRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(DataError::DatasetEmpty {
                path: path.display().to_string(),
            });
        }

        let dataset = Self { records };
        let violations = dataset.age_invariant_violations();
        if violations > 0 {
            warn!(
                "{} of {} rows violate Vehicle_Age == Simulation_Year - Year",
                violations,
                dataset.len()
            );
        }
        info!("Loaded {} rows from {}", dataset.len(), path.display());

        Ok(dataset)
    }

    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn age_invariant_violations(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.age_is_consistent())
            .count()
    }

    /// First historical row for (brand, model), the default template.
    pub fn template(&self, brand: &str, model: &str) -> Option<&VehicleRecord> {
        self.records
            .iter()
            .find(|r| r.brand == brand && r.model == model)
    }

    pub fn brands(&self) -> Vec<String> {
        sorted_distinct(self.records.iter().map(|r| r.brand.as_str()))
    }

    pub fn models_for(&self, brand: &str) -> Vec<String> {
        sorted_distinct(
            self.records
                .iter()
                .filter(|r| r.brand == brand)
                .map(|r| r.model.as_str()),
        )
    }

    pub fn fuel_types(&self) -> Vec<String> {
        sorted_distinct(self.records.iter().map(|r| r.fuel.as_str()))
    }

    pub fn transmission_types(&self) -> Vec<String> {
        sorted_distinct(self.records.iter().map(|r| r.transmission.as_str()))
    }

    pub fn production_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    set.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record_with;
    use std::fs;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record_with("Toyota", "Avanza", 2018, "Bensin", "Manual"),
            record_with("Toyota", "Avanza", 2020, "Bensin", "Automatic"),
            record_with("Honda", "Jazz", 2019, "Bensin", "Automatic"),
            record_with("Toyota", "Innova", 2017, "Diesel", "Manual"),
        ])
    }

    #[test]
    fn test_choice_lists_sorted_distinct() {
        let ds = dataset();
        assert_eq!(ds.brands(), ["Honda", "Toyota"]);
        assert_eq!(ds.models_for("Toyota"), ["Avanza", "Innova"]);
        assert_eq!(ds.models_for("Honda"), ["Jazz"]);
        assert_eq!(ds.fuel_types(), ["Bensin", "Diesel"]);
        assert_eq!(ds.transmission_types(), ["Automatic", "Manual"]);
        assert_eq!(ds.production_years(), [2017, 2018, 2019, 2020]);
    }

    #[test]
    fn test_template_is_first_match() {
        let ds = dataset();
        let template = ds.template("Toyota", "Avanza").unwrap();
        assert_eq!(template.year, 2018);

        assert!(ds.template("Suzuki", "Ertiga").is_none());
    }

    #[test]
    fn test_invariant_violation_count() {
        let mut bad = record_with("Honda", "Brio", 2019, "Bensin", "Manual");
        bad.vehicle_age += 1;

        let ds = Dataset::from_records(vec![
            record_with("Toyota", "Avanza", 2018, "Bensin", "Manual"),
            bad,
        ]);
        assert_eq!(ds.age_invariant_violations(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load(Path::new("/nonexistent/depreciated-clear.csv"));
        assert!(matches!(result, Err(DataError::DatasetMissing { .. })));
    }

    #[test]
    fn test_load_csv_file() {
        let path = std::env::temp_dir().join(format!("carcast-dataset-{}.csv", std::process::id()));

        let mut wtr = csv::Writer::from_path(&path).unwrap();
        wtr.serialize(record_with("Toyota", "Avanza", 2018, "Bensin", "Manual"))
            .unwrap();
        wtr.serialize(record_with("Honda", "Jazz", 2019, "Bensin", "Automatic"))
            .unwrap();
        wtr.flush().unwrap();

        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.brands(), ["Honda", "Toyota"]);
        assert_eq!(ds.age_invariant_violations(), 0);

        fs::remove_file(&path).unwrap();
    }
}
