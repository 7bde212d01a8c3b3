//! The model boundary and the inference engine built on top of it.

pub mod classifier;
pub mod ort_model;

pub use classifier::{Classifier, Prediction};
pub use ort_model::{OrtModel, TrainedModel};
