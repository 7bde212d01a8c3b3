//! Image preprocessing for the classification pipeline.

pub mod preprocess;

pub use preprocess::{CanonicalImage, Preprocessor};
