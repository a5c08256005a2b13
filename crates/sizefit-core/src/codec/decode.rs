//! Container sniffing and decoding.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use super::SourceImage;
use crate::error::{CompressError, CompressResult};
use crate::format::ImageFormat;

/// Decode JPEG or PNG bytes into a [`SourceImage`].
///
/// The container is identified from its magic bytes, not from a file name.
/// A file that is a real GIF, WebP or other container is therefore reported
/// as unsupported, not as a decode failure, even though no decoder for it is
/// built in. Only bytes that match no known signature are a decode failure.
///
/// # Errors
///
/// Returns `CompressError::Decode` if the bytes are not a recognisable image
/// or are corrupted or truncated.
/// Returns `CompressError::UnsupportedFormat` if the container is recognised
/// but is neither JPEG nor PNG.
pub fn decode_image(bytes: &[u8]) -> CompressResult<SourceImage> {
    let detected = image::guess_format(bytes)
        .map_err(|_| CompressError::decode("unrecognized image container"))?;
    let format = ImageFormat::from_detected(detected)?;

    let img = ImageReader::with_format(Cursor::new(bytes), detected)
        .decode()
        .map_err(|e| CompressError::decode(e.to_string()))?;

    Ok(SourceImage::new(normalize(img, format), format))
}

/// Bring decoded pixels into a layout the matching encoder accepts.
///
/// JPEG has no alpha channel and only 8-bit samples, so anything other than
/// 8-bit grey becomes 8-bit RGB. PNG keeps whatever it decoded to.
fn normalize(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        ImageFormat::Jpeg => match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
            other => DynamicImage::ImageRgb8(other.into_rgb8()),
        },
        ImageFormat::Png => img,
    }
}
