use crate::domain::vehicle::VehicleRecord;
use tracing::warn;

/// Default simulation inputs derived from the first historical row matching
/// the chosen (brand, model). Every recognized field and its derivation
/// rule lives here; user overrides that fail to parse fall back to these.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDefaults {
    pub year: i32,
    pub fuel: String,
    pub transmission: String,
    pub price: i64,
    pub kilometer: i64,
}

impl VehicleDefaults {
    /// Copies year/fuel/transmission/price from the template row and
    /// back-projects its mileage to the reference year.
    ///
    /// The implied yearly rate is `Simulation_Kilometer / Vehicle_Age`,
    /// defined only when both are strictly positive; otherwise the default
    /// is 0. A template built after the reference year yields a negative
    /// back-projection; that is surfaced with a warning, not corrected.
    pub fn from_template(template: &VehicleRecord, reference_year: i32) -> Self {
        if template.year > reference_year {
            warn!(
                "Template row for {} {} is from {}, after the reference year {}; \
                 the derived kilometre default will be negative",
                template.brand, template.model, template.year, reference_year
            );
        }

        let kilometer = if template.simulation_kilometer > 0 && template.vehicle_age > 0 {
            let rate = template.simulation_kilometer as f64 / template.vehicle_age as f64;
            (rate * (reference_year - template.year) as f64).round() as i64
        } else {
            0
        };

        Self {
            year: template.year,
            fuel: template.fuel.clone(),
            transmission: template.transmission.clone(),
            price: template.price,
            kilometer,
        }
    }
}
