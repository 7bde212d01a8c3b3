//! Pipeline configuration types.
//!
//! [`PipelineConfig`] carries every knob a run needs: where to read images,
//! where the owned output tree lives, which model artifact to load, the
//! label table, and the parallelism threshold. Configurations can be built
//! in code or loaded from JSON.

use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::core::labels::LabelSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of eligible files at or below which a run stays strictly
/// sequential. Larger batches fan out per-file across the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Configuration for a classification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory scanned for input images.
    pub input_dir: PathBuf,
    /// Output root. The pipeline owns this path: it is removed and recreated
    /// on every run.
    pub output_dir: PathBuf,
    /// Path to the ONNX model artifact.
    pub model_path: PathBuf,
    /// Label table mapping class indices to names.
    #[serde(default)]
    pub labels: LabelSet,
    /// Model input size as (width, height).
    #[serde(default = "PipelineConfig::default_input_shape")]
    pub input_shape: (u32, u32),
    /// File-count threshold for parallel processing (<= this runs sequentially).
    #[serde(default = "PipelineConfig::default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl PipelineConfig {
    /// Creates a configuration with default label table, input shape, and
    /// parallelism threshold.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        model_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            model_path: model_path.into(),
            labels: LabelSet::default(),
            input_shape: Self::default_input_shape(),
            parallel_threshold: Self::default_parallel_threshold(),
        }
    }

    fn default_input_shape() -> (u32, u32) {
        (28, 28)
    }

    fn default_parallel_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> ClassifyResult<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ClassifyError::config_error(format!(
                "invalid pipeline config {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the label set is empty, either input
    /// dimension is zero, or the parallel threshold is zero.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.labels.is_empty() {
            return Err(ClassifyError::config_error("label set must not be empty"));
        }

        let (width, height) = self.input_shape;
        if width == 0 || height == 0 {
            return Err(ClassifyError::config_error(format!(
                "input shape dimensions must be greater than 0, got ({}, {})",
                width, height
            )));
        }

        if self.parallel_threshold == 0 {
            return Err(ClassifyError::config_error(
                "parallel threshold must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = PipelineConfig::new("in", "out", "model.onnx");
        assert!(config.validate().is_ok());
        assert_eq!(config.input_shape, (28, 28));
        assert_eq!(config.labels.len(), 10);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let mut config = PipelineConfig::new("in", "out", "model.onnx");
        config.input_shape = (0, 28);
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_parallel_threshold_is_rejected() {
        let mut config = PipelineConfig::new("in", "out", "model.onnx");
        config.parallel_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_with_omitted_fields_uses_defaults() {
        let json = r#"{
            "input_dir": "test-image",
            "output_dir": "result",
            "model_path": "fashion_mnist_model.onnx"
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input_shape, (28, 28));
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.labels, LabelSet::fashion_mnist());
        assert!(config.validate().is_ok());
    }
}
