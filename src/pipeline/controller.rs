//! Orchestrates a full classification run.
//!
//! A run moves through a fixed sequence: prepare the output tree and load
//! the model (failures here abort before any file is touched), scan the
//! input directory, process each eligible file, then finalize the report.
//! Per-file failures are confined to the file that caused them; the loop
//! never stops because one entry was unreadable.

use crate::core::{ClassifyResult, PipelineConfig};
use crate::inference::{Classifier, OrtModel, Prediction, TrainedModel};
use crate::pipeline::router::OutputRouter;
use crate::pipeline::stats::{ClassificationReport, StatsAggregator};
use crate::processors::Preprocessor;
use crate::utils::is_supported_extension;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// End-to-end classification pipeline: scan, preprocess, classify, route,
/// tally.
pub struct Pipeline {
    config: PipelineConfig,
    model: Box<dyn TrainedModel>,
    preprocessor: Preprocessor,
    classifier: Classifier,
    router: OutputRouter,
}

impl Pipeline {
    /// Builds the pipeline around an already-loaded model.
    ///
    /// Fails fast on an invalid configuration; no filesystem work happens
    /// here. Use [`PipelineBuilder`] to load the model artifact from disk.
    pub fn with_model(
        config: PipelineConfig,
        model: Box<dyn TrainedModel>,
    ) -> ClassifyResult<Self> {
        config.validate()?;

        let preprocessor = Preprocessor::new(config.input_shape);
        let classifier = Classifier::new(config.labels.clone(), config.input_shape);
        let router = OutputRouter::new(&config.output_dir, config.labels.clone());

        Ok(Self {
            config,
            model,
            preprocessor,
            classifier,
            router,
        })
    }

    /// Runs the pipeline to exhaustion of the input directory listing and
    /// returns the final report.
    ///
    /// # Errors
    ///
    /// Returns an error only for initialization failures: the output tree
    /// cannot be cleared or created, or the input directory cannot be read.
    /// Per-file failures are logged and skipped.
    pub fn run(&self) -> ClassifyResult<ClassificationReport> {
        self.router.prepare()?;

        let entries = self.scan_input()?;
        info!(
            "classifying {} files from {}",
            entries.len(),
            self.config.input_dir.display()
        );

        let predictions: Vec<Prediction> = if entries.len() > self.config.parallel_threshold {
            entries
                .par_iter()
                .filter_map(|path| self.process_file(path))
                .collect()
        } else {
            entries
                .iter()
                .filter_map(|path| self.process_file(path))
                .collect()
        };

        let mut stats = StatsAggregator::new(self.config.labels.clone());
        for prediction in &predictions {
            stats.record(prediction);
        }

        Ok(stats.report())
    }

    /// Lists eligible files, sorted by name so reruns visit them in the same
    /// order. Entries without a supported extension are ignored, not errors.
    fn scan_input(&self) -> ClassifyResult<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir)? {
            let path = entry?.path();
            if path.is_file() && is_supported_extension(&path) {
                entries.push(path);
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// One file's preprocess, classify, and route sequence. Any failure is
    /// confined to this file.
    fn process_file(&self, path: &Path) -> Option<Prediction> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        match self.process_inner(path, &filename) {
            Ok(prediction) => {
                info!(
                    "{}: {} ({:.2}%)",
                    prediction.filename, prediction.label, prediction.confidence
                );
                Some(prediction)
            }
            Err(e) => {
                warn!("skipping {}: {}", filename, e);
                None
            }
        }
    }

    fn process_inner(&self, path: &Path, filename: &str) -> ClassifyResult<Prediction> {
        let canonical = self.preprocessor.preprocess(path)?;
        let prediction = self
            .classifier
            .classify(&canonical.tensor, self.model.as_ref(), filename)?;
        self.router.route(&canonical, &prediction)?;
        Ok(prediction)
    }
}

/// Builder for [`Pipeline`] that loads the model artifact from disk.
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Creates a builder from the three required paths, with defaults for
    /// everything else.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        model_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config: PipelineConfig::new(input_dir, output_dir, model_path),
        }
    }

    /// Creates a builder from a full configuration.
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Sets the label table.
    pub fn labels(mut self, labels: crate::core::LabelSet) -> Self {
        self.config.labels = labels;
        self
    }

    /// Sets the model input size as (width, height).
    pub fn input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.config.input_shape = input_shape;
        self
    }

    /// Sets the file-count threshold above which files are processed in
    /// parallel.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Loads the model artifact and assembles the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the model artifact
    /// is missing, unreadable, or corrupt. Either failure aborts before any
    /// image work starts.
    pub fn build(self) -> ClassifyResult<Pipeline> {
        let model = OrtModel::load(&self.config.model_path)?;
        Pipeline::with_model(self.config, Box::new(model))
    }
}
