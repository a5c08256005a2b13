//! JPEG and PNG encoding at a requested quality.
//!
//! JPEG quality goes straight to the encoder. PNG is lossless and has no
//! quality setting, so the quality value is turned into a compression effort
//! level instead: `effort = 9 - quality / 10`, clamped to `0..=9`.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::SourceImage;
use crate::error::{CompressError, CompressResult};
use crate::format::ImageFormat;

/// Highest PNG effort level.
pub const MAX_PNG_EFFORT: u8 = 9;

/// Encode a source image in its own container format.
///
/// # Arguments
///
/// * `image` - The decoded source
/// * `quality` - 0-100; JPEG quality, or the PNG effort proxy
pub fn encode_image(image: &SourceImage, quality: u8) -> CompressResult<Vec<u8>> {
    match image.format() {
        ImageFormat::Jpeg => encode_jpeg(image, quality),
        ImageFormat::Png => encode_png(image, quality),
    }
}

/// Encode to JPEG bytes.
///
/// Quality is clamped to 1-100; the encoder has no quality 0.
pub fn encode_jpeg(image: &SourceImage, quality: u8) -> CompressResult<Vec<u8>> {
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    write_pixels(encoder, image)?;

    Ok(buffer.into_inner())
}

/// Encode to PNG bytes, using `quality` to pick the compression effort.
pub fn encode_png(image: &SourceImage, quality: u8) -> CompressResult<Vec<u8>> {
    let compression = compression_for_effort(png_effort(quality));

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(&mut buffer, compression, FilterType::Adaptive);
    write_pixels(encoder, image)?;

    Ok(buffer.into_inner())
}

/// Map a quality value to a PNG effort level in `0..=9`.
///
/// High quality means low effort, so the first attempts of a search are fast
/// and later ones squeeze harder.
pub fn png_effort(quality: u8) -> u8 {
    MAX_PNG_EFFORT.saturating_sub(quality.min(100) / 10)
}

/// Map an effort level onto the encoder's compression setting.
///
/// Levels 1-9 go straight to the deflate level. Effort 0 is the fastest
/// setting that still compresses; `Level(0)` would store the data raw.
pub fn compression_for_effort(effort: u8) -> CompressionType {
    match effort.min(MAX_PNG_EFFORT) {
        0 => CompressionType::Fast,
        level => CompressionType::Level(level),
    }
}

fn write_pixels<E: ImageEncoder>(encoder: E, image: &SourceImage) -> CompressResult<()> {
    encoder
        .write_image(
            image.as_bytes(),
            image.width(),
            image.height(),
            ExtendedColorType::from(image.color_type()),
        )
        .map_err(|e| CompressError::encode(e.to_string()))
}
