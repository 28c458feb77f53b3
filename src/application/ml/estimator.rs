use crate::domain::errors::PipelineError;
use crate::domain::vehicle::FeatureRow;

/// Interface the simulator programs against.
///
/// Any sufficiently expressive tabular regressor can stand behind this;
/// the concrete model is an implementation detail of the artifact.
pub trait ValueEstimator {
    /// Estimated value (currency units) for one feature row.
    fn predict(&self, row: &FeatureRow) -> Result<f64, PipelineError>;

    /// Model name/type, for logs.
    fn name(&self) -> &str;
}
