//! Core types shared across the classification pipeline.
//!
//! This module contains the label table, configuration, error handling,
//! and the tensor alias used at the model boundary, along with re-exports
//! of the most commonly used types.

pub mod config;
pub mod errors;
pub mod labels;

pub use config::{DEFAULT_PARALLEL_THRESHOLD, PipelineConfig};
pub use errors::{ClassifyError, ClassifyResult, ProcessingStage};
pub use labels::LabelSet;

/// A single-image input tensor shaped (batch, height, width).
pub type Tensor3D = ndarray::Array3<f32>;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and
/// formatting layer. It's typically called at the start of an application to
/// enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
