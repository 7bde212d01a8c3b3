//! Utility functions for image handling.
//!
//! This module provides functions for loading images and converting them to
//! the single-channel representation the classifier works with, plus the
//! extension filter that decides which directory entries are eligible input.

use crate::core::ClassifyError;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// File extensions the pipeline will attempt to decode (lowercase).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Returns true if the path carries a supported image extension.
///
/// The comparison is case-insensitive; files without an extension are not
/// supported.
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Loads an image from a file path.
///
/// Handles any image format supported by the image crate; the format is
/// detected from the file content, not the extension.
///
/// # Errors
///
/// Returns a `ClassifyError::ImageLoad` error if the file is missing,
/// unreadable, zero-byte, or not decodable.
pub fn load_image(path: &Path) -> Result<DynamicImage, ClassifyError> {
    image::open(path).map_err(ClassifyError::ImageLoad)
}

/// Converts a DynamicImage to an 8-bit grayscale image using the standard
/// luminance weighting.
pub fn dynamic_to_gray(img: DynamicImage) -> GrayImage {
    img.to_luma8()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_extension(Path::new("a.png")));
        assert!(is_supported_extension(Path::new("a.PNG")));
        assert!(is_supported_extension(Path::new("a.Jpg")));
        assert!(is_supported_extension(Path::new("a.jpeg")));
    }

    #[test]
    fn other_extensions_are_not_supported() {
        assert!(!is_supported_extension(Path::new("a.txt")));
        assert!(!is_supported_extension(Path::new("a.gif")));
        assert!(!is_supported_extension(Path::new("png")));
        assert!(!is_supported_extension(Path::new("a")));
    }

    #[test]
    fn load_image_reports_missing_file() {
        let result = load_image(Path::new("does-not-exist.png"));
        assert!(matches!(result, Err(ClassifyError::ImageLoad(_))));
    }

    #[test]
    fn dynamic_to_gray_reduces_channels() {
        let rgb = DynamicImage::new_rgb8(4, 2);
        let gray = dynamic_to_gray(rgb);
        assert_eq!(gray.dimensions(), (4, 2));
    }
}
