//! Canonicalizes raw input images into the representation the classifier expects.
//!
//! Arbitrary input images (any size, any channel count) are reduced to a
//! single luminance channel, resized to the model's fixed input shape, and
//! scaled into [0.0, 1.0]. The intensity divisor matches the one used at
//! training time so the tensor distribution matches the classifier's
//! training input.

use crate::core::{ClassifyError, ClassifyResult, Tensor3D};
use crate::utils::{dynamic_to_gray, is_supported_extension, load_image};
use image::{DynamicImage, GrayImage, imageops, imageops::FilterType};
use ndarray::Array3;
use std::path::Path;
use tracing::debug;

/// Divisor mapping 8-bit intensities into [0.0, 1.0]; must match training.
const INTENSITY_SCALE: f32 = 255.0;

/// A decoded input reduced to the classifier's canonical representation.
#[derive(Debug, Clone)]
pub struct CanonicalImage {
    /// The resized single-channel image, kept so the router can persist it.
    pub gray: GrayImage,
    /// (1, height, width) tensor with intensities in [0.0, 1.0].
    pub tensor: Tensor3D,
}

/// Converts arbitrary input images into fixed-shape grayscale tensors.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    /// Target size as (width, height).
    target: (u32, u32),
}

impl Preprocessor {
    /// Creates a preprocessor producing `target`-sized (width, height) tensors.
    pub fn new(target: (u32, u32)) -> Self {
        Self { target }
    }

    /// Decodes the image at `path` and canonicalizes it.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported extensions and for files that cannot
    /// be read or decoded. All such failures are recoverable at the per-file
    /// boundary; the caller skips the file and continues.
    pub fn preprocess(&self, path: &Path) -> ClassifyResult<CanonicalImage> {
        if !is_supported_extension(path) {
            return Err(ClassifyError::invalid_input(format!(
                "unsupported image extension: {}",
                path.display()
            )));
        }

        let img = load_image(path)?;
        debug!(
            "decoded {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        self.canonicalize(img)
    }

    /// Reduces a decoded image to a single channel, resizes it to the target
    /// shape with the Catmull-Rom (bicubic) filter, and scales intensities
    /// into [0.0, 1.0].
    pub fn canonicalize(&self, img: DynamicImage) -> ClassifyResult<CanonicalImage> {
        let (width, height) = self.target;
        let gray = imageops::resize(&dynamic_to_gray(img), width, height, FilterType::CatmullRom);
        let tensor = Array3::from_shape_fn((1, height as usize, width as usize), |(_, y, x)| {
            f32::from(gray.get_pixel(x as u32, y as u32)[0]) / INTENSITY_SCALE
        });
        Ok(CanonicalImage { gray, tensor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn constant_image(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn all_zero_input_canonicalizes_to_all_zero_tensor() {
        let preprocessor = Preprocessor::new((28, 28));
        let canonical = preprocessor.canonicalize(constant_image(10, 10, 0)).unwrap();

        assert_eq!(canonical.tensor.shape(), &[1, 28, 28]);
        assert_eq!(canonical.gray.dimensions(), (28, 28));
        assert!(canonical.tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn intensities_are_scaled_by_255() {
        let preprocessor = Preprocessor::new((28, 28));
        let canonical = preprocessor
            .canonicalize(constant_image(56, 56, 255))
            .unwrap();

        assert!(canonical.tensor.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn oversized_color_input_is_reduced_and_resized() {
        let rgb = DynamicImage::new_rgb8(100, 40);
        let preprocessor = Preprocessor::new((28, 28));
        let canonical = preprocessor.canonicalize(rgb).unwrap();

        assert_eq!(canonical.tensor.shape(), &[1, 28, 28]);
        assert!(canonical.tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_decoding() {
        let preprocessor = Preprocessor::new((28, 28));
        let result = preprocessor.preprocess(Path::new("image.bmp"));
        assert!(matches!(result, Err(ClassifyError::InvalidInput { .. })));
    }

    #[test]
    fn corrupt_file_reports_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();

        let preprocessor = Preprocessor::new((28, 28));
        let result = preprocessor.preprocess(&path);
        assert!(matches!(result, Err(ClassifyError::ImageLoad(_))));
    }

    #[test]
    fn preprocess_round_trips_through_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        constant_image(10, 10, 0).save(&path).unwrap();

        let preprocessor = Preprocessor::new((28, 28));
        let canonical = preprocessor.preprocess(&path).unwrap();
        assert_eq!(canonical.tensor.shape(), &[1, 28, 28]);
        assert!(canonical.tensor.iter().all(|&v| v == 0.0));
    }
}
