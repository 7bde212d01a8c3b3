//! # Fashion Sorter
//!
//! A Rust library that classifies small grayscale images into ten fixed
//! fashion-item categories with a previously trained ONNX model, sorts each
//! image into a label-keyed output tree, and reports per-label counts.
//!
//! ## Features
//!
//! - Canonical preprocessing: any input image is reduced to a single
//!   luminance channel, resized to the model's 28x28 input, and scaled into
//!   [0.0, 1.0]
//! - ONNX Runtime integration behind an opaque [`inference::TrainedModel`]
//!   trait, so any numeric runtime can stand in
//! - Deterministic routing of classified images into one subdirectory per
//!   label, rebuilt fresh on every run
//! - Per-label statistics with a serializable end-of-run report
//! - Error-tolerant batch iteration: one unreadable file never stops a run
//!
//! ## Modules
//!
//! * [`core`] - Label tables, configuration, error handling
//! * [`inference`] - The model boundary and the classifier built on it
//! * [`pipeline`] - Output routing, statistics, and the run controller
//! * [`processors`] - Image preprocessing
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fashion_sorter::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = PipelineBuilder::new("test-image", "result", "fashion_mnist_model.onnx")
//!     .build()?;
//!
//! let report = pipeline.run()?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom label tables
//!
//! The label table is an explicit value, not ambient state, so pipelines
//! with differing class sets can coexist:
//!
//! ```rust,no_run
//! use fashion_sorter::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let labels = LabelSet::new(vec!["cat".to_string(), "dog".to_string()])?;
//! let pipeline = PipelineBuilder::new("pets", "sorted", "pets.onnx")
//!     .labels(labels)
//!     .input_shape((64, 64))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod inference;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use fashion_sorter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ClassifyError, ClassifyResult, LabelSet, PipelineConfig, init_tracing,
    };
    pub use crate::inference::{Classifier, OrtModel, Prediction, TrainedModel};
    pub use crate::pipeline::{ClassificationReport, Pipeline, PipelineBuilder};
}
