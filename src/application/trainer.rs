use crate::application::ml::{FittedPipeline, TrainingParams, ValuationPipeline};
use crate::domain::errors::PipelineError;
use crate::domain::vehicle::VehicleRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

/// Held-out evaluation metrics. Diagnostic output only; the simulator
/// never reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub mae: f64,
    pub r2: f64,
}

pub struct TrainingOutcome {
    pub pipeline: FittedPipeline,
    pub report: Option<EvalReport>,
}

/// Fits the valuation pipeline on a seeded 80/20 shuffle split and scores
/// the held-out rows. The saved artifact is the model fitted on the
/// training portion, matching the evaluation that was reported for it.
pub struct Trainer {
    params: TrainingParams,
    split_seed: u64,
    test_fraction: f64,
}

impl Trainer {
    pub fn new(params: TrainingParams) -> Self {
        Self {
            params,
            split_seed: 42,
            test_fraction: 0.2,
        }
    }

    pub fn with_split_seed(mut self, seed: u64) -> Self {
        self.split_seed = seed;
        self
    }

    /// Split, fit on the training portion, evaluate on the held-out rows.
    pub fn train(&self, records: &[VehicleRecord]) -> Result<TrainingOutcome, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        let violations = records.iter().filter(|r| !r.age_is_consistent()).count();
        if violations > 0 {
            warn!(
                "{} of {} training rows violate Vehicle_Age == Simulation_Year - Year",
                violations,
                records.len()
            );
        }

        let (train_idx, test_idx) =
            split_indices(records.len(), self.test_fraction, self.split_seed);

        let train_rows: Vec<VehicleRecord> =
            train_idx.iter().map(|&i| records[i].clone()).collect();

        let pipeline = ValuationPipeline::new(self.params.clone()).fit(&train_rows)?;

        let report = if test_idx.is_empty() {
            warn!("Dataset too small for a held-out split; skipping evaluation");
            None
        } else {
            let mut predicted = Vec::with_capacity(test_idx.len());
            let mut actual = Vec::with_capacity(test_idx.len());
            for &i in &test_idx {
                predicted.push(pipeline.predict(&records[i].feature_row())?);
                actual.push(records[i].estimated_value as f64);
            }

            let report = EvalReport {
                train_rows: train_rows.len(),
                test_rows: test_idx.len(),
                mae: mean_absolute_error(&predicted, &actual),
                r2: r_squared(&predicted, &actual),
            };
            info!(
                "Held-out evaluation (n={}): MAE={:.2}, R²={:.4}",
                report.test_rows, report.mae, report.r2
            );
            Some(report)
        };

        Ok(TrainingOutcome { pipeline, report })
    }

    /// Fit on every row, no held-out evaluation.
    pub fn train_full(&self, records: &[VehicleRecord]) -> Result<FittedPipeline, PipelineError> {
        ValuationPipeline::new(self.params.clone()).fit(records)
    }
}

/// Seeded shuffle split: first 80% of the permutation trains, the rest
/// evaluates. The same seed always yields the same partition.
fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train_count = (n as f64 * (1.0 - test_fraction)).floor() as usize;
    let test = indices.split_off(train_count);
    (indices, test)
}

pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.is_empty() {
        return 0.0;
    }
    predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).abs())
        .sum::<f64>()
        / predicted.len() as f64
}

pub fn r_squared(predicted: &[f64], actual: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot <= 0.0 {
        return 0.0;
    }
    let ss_res: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (a - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::synthetic_records;

    #[test]
    fn test_split_is_deterministic_and_disjoint() {
        let (train_a, test_a) = split_indices(100, 0.2, 42);
        let (train_b, test_b) = split_indices(100, 0.2, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        assert_eq!(train_a.len(), 80);
        assert_eq!(test_a.len(), 20);

        let mut all: Vec<usize> = train_a.iter().chain(test_a.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_changes_with_seed() {
        let (train_a, _) = split_indices(100, 0.2, 42);
        let (train_b, _) = split_indices(100, 0.2, 43);
        assert_ne!(train_a, train_b);
    }

    #[test]
    fn test_mae() {
        let mae = mean_absolute_error(&[1.0, 2.0], &[2.0, 4.0]);
        assert!((mae - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_r2_perfect_prediction() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        assert!((r_squared(&actual, &actual) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_actuals() {
        assert_eq!(r_squared(&[1.0, 2.0], &[3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_train_reports_metrics() {
        let outcome = Trainer::new(TrainingParams::default())
            .train(&synthetic_records(150))
            .unwrap();

        let report = outcome.report.expect("150 rows must yield a test split");
        assert_eq!(report.train_rows, 120);
        assert_eq!(report.test_rows, 30);
        assert!(report.mae.is_finite());
        assert!(report.mae >= 0.0);
        assert!(report.r2 <= 1.0);
    }

    #[test]
    fn test_train_rejects_empty_dataset() {
        let result = Trainer::new(TrainingParams::default()).train(&[]);
        assert!(matches!(result, Err(PipelineError::EmptyTrainingSet)));
    }
}
