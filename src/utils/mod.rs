//! Utility functions for the classification pipeline.

pub mod image;

pub use image::{SUPPORTED_EXTENSIONS, dynamic_to_gray, is_supported_extension, load_image};
