//! Core types for decoded images.

use image::{ColorType, DynamicImage};

use crate::format::ImageFormat;

/// A decoded source image together with the container it came from.
///
/// Built once per run and never mutated; every candidate is encoded from the
/// same pixels.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl SourceImage {
    /// Create a SourceImage from decoded pixels and their container format.
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self { image, format }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn color_type(&self) -> ColorType {
        self.image.color()
    }

    /// Raw pixel bytes in the layout given by [`Self::color_type`].
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_bytes()
    }
}
