//! Image container formats the compressor can round-trip.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

/// A supported image container.
///
/// Anything the decoder recognises outside this set is rejected with
/// [`CompressError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossy JPEG; quality maps to the encoder's quality parameter.
    Jpeg,
    /// Lossless PNG; quality is repurposed as a compression-effort proxy.
    Png,
}

impl ImageFormat {
    /// File extension used for candidate files of this format.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    /// Parse a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Map the `image` crate's detected format onto the supported set.
    pub fn from_detected(format: image::ImageFormat) -> Result<Self, CompressError> {
        match format {
            image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
            image::ImageFormat::Png => Ok(ImageFormat::Png),
            other => Err(CompressError::unsupported(format!("{:?}", other).to_lowercase())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Jpeg => f.write_str("jpeg"),
            ImageFormat::Png => f.write_str("png"),
        }
    }
}
