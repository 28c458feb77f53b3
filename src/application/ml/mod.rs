pub mod encoder;
pub mod estimator;
pub mod pipeline;

pub use encoder::CategoryEncoder;
pub use estimator::ValueEstimator;
pub use pipeline::{FittedPipeline, TrainingParams, ValuationPipeline};
