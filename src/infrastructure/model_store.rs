use crate::application::ml::FittedPipeline;
use crate::domain::errors::DataError;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Serialize a fitted pipeline to disk, creating parent directories.
pub fn save_pipeline(path: &Path, pipeline: &FittedPipeline) -> Result<(), DataError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| DataError::ArtifactWrite {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
    }

    let file = File::create(path).map_err(|e| DataError::ArtifactWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::to_writer(BufWriter::new(file), pipeline).map_err(|e| {
        DataError::ArtifactWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    info!("Saved model artifact to {}", path.display());
    Ok(())
}

/// Load a fitted pipeline saved by [`save_pipeline`].
pub fn load_pipeline(path: &Path) -> Result<FittedPipeline, DataError> {
    if !path.exists() {
        return Err(DataError::ArtifactMissing {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|e| DataError::ArtifactRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let pipeline =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| DataError::ArtifactRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    info!("Loaded model artifact from {}", path.display());
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::ValuationPipeline;
    use crate::domain::vehicle::FeatureRow;
    use crate::testing::synthetic_records;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("carcast-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_save_load_roundtrip_predicts_identically() {
        let fitted = ValuationPipeline::default()
            .fit(&synthetic_records(80))
            .unwrap();
        let path = temp_path("artifact.json");

        save_pipeline(&path, &fitted).unwrap();
        let restored = load_pipeline(&path).unwrap();

        let row = FeatureRow {
            brand: "Toyota".to_string(),
            year: 2018,
            fuel: "Bensin".to_string(),
            transmission: "Manual".to_string(),
            price: 150_000_000,
            simulation_year: 2026,
            vehicle_age: 8,
            simulation_kilometer: 65_777,
        };
        let diff = (fitted.predict(&row).unwrap() - restored.predict(&row).unwrap()).abs();
        assert!(diff < 1e-9);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_artifact() {
        let result = load_pipeline(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(DataError::ArtifactMissing { .. })));
    }

    #[test]
    fn test_load_corrupt_artifact() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "not a pipeline").unwrap();

        let result = load_pipeline(&path);
        assert!(matches!(result, Err(DataError::ArtifactRead { .. })));

        fs::remove_file(&path).unwrap();
    }
}
