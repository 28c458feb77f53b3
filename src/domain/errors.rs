use thiserror::Error;

/// Errors raised while loading external inputs (dataset, model artifact)
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset not found at {path}")]
    DatasetMissing { path: String },

    #[error("Failed to read dataset {path}: {reason}")]
    DatasetRead { path: String, reason: String },

    #[error("Dataset {path} contains no rows")]
    DatasetEmpty { path: String },

    #[error("Model artifact not found at {path}. Run the `train` binary first.")]
    ArtifactMissing { path: String },

    #[error("Failed to load model artifact {path}: {reason}")]
    ArtifactRead { path: String, reason: String },

    #[error("Failed to write model artifact {path}: {reason}")]
    ArtifactWrite { path: String, reason: String },
}

/// Errors raised by the valuation pipeline itself
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Cannot fit pipeline: no training rows")]
    EmptyTrainingSet,

    #[error("Feature matrix construction failed: {reason}")]
    FeatureMatrix { reason: String },

    #[error("Model training failed: {reason}")]
    Training { reason: String },

    #[error("Prediction failed: {reason}")]
    Prediction { reason: String },

    #[error("Model returned no prediction")]
    EmptyPrediction,
}
