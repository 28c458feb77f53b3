use crate::domain::ml::feature_registry::{CATEGORICAL_COLUMNS, categorical_values};
use crate::domain::vehicle::{FeatureRow, VehicleRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder over the categorical vehicle columns.
///
/// Fitting collects the distinct non-missing values of each column into a
/// sorted vocabulary, which fixes the indicator column layout. A value not
/// seen during fitting encodes as all zeros for its column block; it never
/// fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryEncoder {
    // One sorted vocabulary per entry of CATEGORICAL_COLUMNS.
    vocabularies: Vec<Vec<String>>,
}

impl CategoryEncoder {
    pub fn fit(records: &[VehicleRecord]) -> Self {
        let mut sets: Vec<BTreeSet<String>> = vec![BTreeSet::new(); CATEGORICAL_COLUMNS.len()];

        for record in records {
            let row = record.feature_row();
            let values = categorical_values(&row);
            for (set, value) in sets.iter_mut().zip(values) {
                if !value.is_empty() {
                    set.insert(value.to_string());
                }
            }
        }

        Self {
            vocabularies: sets
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
        }
    }

    /// Total width of the encoded categorical block.
    pub fn encoded_width(&self) -> usize {
        self.vocabularies.iter().map(Vec::len).sum()
    }

    /// Indicator vector for one row, column blocks in registry order.
    pub fn transform(&self, row: &FeatureRow) -> Vec<f64> {
        let values = categorical_values(row);
        let mut encoded = Vec::with_capacity(self.encoded_width());

        for (vocabulary, value) in self.vocabularies.iter().zip(values) {
            for known in vocabulary {
                encoded.push(if known.as_str() == value { 1.0 } else { 0.0 });
            }
        }

        encoded
    }

    pub fn vocabulary(&self, column: usize) -> &[String] {
        &self.vocabularies[column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record_with;

    fn fitted() -> CategoryEncoder {
        let records = vec![
            record_with("Toyota", "Avanza", 2018, "Bensin", "Manual"),
            record_with("Honda", "Jazz", 2019, "Bensin", "Automatic"),
            record_with("Toyota", "Innova", 2020, "Diesel", "Automatic"),
        ];
        CategoryEncoder::fit(&records)
    }

    #[test]
    fn test_vocabularies_sorted_distinct() {
        let enc = fitted();
        assert_eq!(enc.vocabulary(0), ["Honda", "Toyota"]);
        assert_eq!(enc.vocabulary(1), ["Bensin", "Diesel"]);
        assert_eq!(enc.vocabulary(2), ["Automatic", "Manual"]);
        assert_eq!(enc.encoded_width(), 6);
    }

    #[test]
    fn test_known_value_lights_one_indicator() {
        let enc = fitted();
        let row = record_with("Toyota", "Avanza", 2018, "Bensin", "Manual").feature_row();
        let encoded = enc.transform(&row);

        // [Honda, Toyota | Bensin, Diesel | Automatic, Manual]
        assert_eq!(encoded, vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unseen_value_encodes_as_zeros() {
        let enc = fitted();
        let row = record_with("Suzuki", "Ertiga", 2021, "Hybrid", "Manual").feature_row();
        let encoded = enc.transform(&row);

        assert_eq!(encoded.len(), 6);
        // Brand and fuel blocks all zero, transmission still matches.
        assert_eq!(&encoded[..4], &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(&encoded[4..], &[0.0, 1.0]);
    }

    #[test]
    fn test_missing_values_excluded_from_vocabulary() {
        let records = vec![
            record_with("", "Avanza", 2018, "Bensin", "Manual"),
            record_with("Toyota", "Avanza", 2018, "Bensin", "Manual"),
        ];
        let enc = CategoryEncoder::fit(&records);
        assert_eq!(enc.vocabulary(0), ["Toyota"]);
    }

    #[test]
    fn test_serde_roundtrip_preserves_layout() {
        let enc = fitted();
        let json = serde_json::to_string(&enc).unwrap();
        let restored: CategoryEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, enc);
    }
}
