//! Sizefit Core - fit an image under a byte budget
//!
//! This crate re-encodes a single JPEG or PNG at decreasing quality until the
//! result fits under a size ceiling, including the codec adapter, the size
//! prober and the quality search itself.

pub mod codec;
pub mod error;
pub mod format;
pub mod probe;
pub mod search;

use std::path::Path;

pub use codec::{Codec, ImageCodec, SourceImage};
pub use error::{CompressError, CompressResult};
pub use format::ImageFormat;
pub use search::{
    Attempt, CompressionReport, CompressionRequest, Compressor, SearchConfig, SmallSourcePolicy,
    Strategy,
};

/// Compress `input` into `output` so the result is at most `max_size_kb`
/// kilobytes, using the default codec and search settings.
pub fn compress_image(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    max_size_kb: u64,
) -> CompressResult<CompressionReport> {
    let request = CompressionRequest::new(input.as_ref(), output.as_ref(), max_size_kb);
    Compressor::new().compress(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageEncoder};
    use std::fs;
    use std::path::PathBuf;

    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let dir =
                std::env::temp_dir().join(format!("sizefit-e2e-{}-{}", std::process::id(), name));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }

        fn entries(&self) -> Vec<String> {
            let mut names: Vec<String> = fs::read_dir(&self.0)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    /// Deterministic RGB noise; compresses badly in both formats.
    fn noise(width: u32, height: u32) -> image::RgbImage {
        let mut state: u32 = 0x1234_5678;
        image::RgbImage::from_fn(width, height, |_, _| {
            let mut next = || {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            };
            image::Rgb([next(), next(), next()])
        })
    }

    fn write_jpeg(path: &Path, img: &image::RgbImage, quality: u8) -> u64 {
        let mut buf = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
            .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgb8)
            .unwrap();
        fs::write(path, &buf).unwrap();
        buf.len() as u64
    }

    fn write_png(path: &Path, img: &DynamicImage) -> u64 {
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(img.as_bytes(), img.width(), img.height(), img.color().into())
            .unwrap();
        fs::write(path, &buf).unwrap();
        buf.len() as u64
    }

    #[test]
    fn test_large_jpeg_is_searched_under_ceiling() {
        let dir = ScratchDir::new("large-jpeg");
        let input = dir.path("input.jpg");
        let output = dir.path("output.jpg");
        let source_len = write_jpeg(&input, &noise(256, 256), 100);

        let max_size_kb = source_len / 2 / 1024;
        let report = compress_image(&input, &output, max_size_kb).unwrap();

        let ceiling = max_size_kb * 1024;
        assert_eq!(report.strategy, Strategy::Searched);
        assert_eq!(report.format, ImageFormat::Jpeg);
        assert!(report.output_bytes <= ceiling);
        assert_eq!(fs::metadata(&output).unwrap().len(), report.output_bytes);

        let qualities: Vec<u8> = report.attempts.iter().map(|a| a.quality).collect();
        let expected: Vec<u8> = SearchConfig::default()
            .qualities()
            .take(qualities.len())
            .collect();
        assert_eq!(qualities, expected);
        assert_eq!(report.quality, qualities.last().copied());

        let (rejected, accepted) = report.attempts.split_at(report.attempts.len() - 1);
        assert!(rejected.iter().all(|a| a.size_bytes > ceiling));
        assert!(accepted[0].size_bytes <= ceiling);

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (256, 256));
        assert_eq!(dir.entries(), vec!["input.jpg", "output.jpg"]);
    }

    #[test]
    fn test_small_png_is_reencoded_once() {
        let dir = ScratchDir::new("small-png");
        let input = dir.path("input.png");
        let output = dir.path("output.png");
        let img = DynamicImage::ImageRgb8(noise(32, 32));
        write_png(&input, &img);

        let report = compress_image(&input, &output, 500).unwrap();

        assert_eq!(report.strategy, Strategy::Reencoded);
        assert_eq!(report.format, ImageFormat::Png);
        assert_eq!(report.quality, Some(95));
        assert!(report.attempts.is_empty());

        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.as_bytes(), img.as_bytes());
        assert_eq!(dir.entries(), vec!["input.png", "output.png"]);
    }

    #[test]
    fn test_noisy_jpeg_with_tiny_ceiling_is_infeasible() {
        let dir = ScratchDir::new("infeasible-jpeg");
        let input = dir.path("input.jpg");
        let output = dir.path("output.jpg");
        write_jpeg(&input, &noise(256, 256), 90);

        let err = compress_image(&input, &output, 1).unwrap_err();

        match err {
            CompressError::CompressionInfeasible {
                ceiling_bytes,
                smallest_bytes,
                attempts,
            } => {
                assert_eq!(ceiling_bytes, 1024);
                assert!(smallest_bytes > 1024);
                assert_eq!(attempts, 19);
            }
            other => panic!("Expected CompressionInfeasible, got: {:?}", other),
        }
        assert!(!output.exists());
        assert_eq!(dir.entries(), vec!["input.jpg"]);
    }

    #[test]
    fn test_noisy_png_with_tiny_ceiling_is_infeasible() {
        let dir = ScratchDir::new("infeasible-png");
        let input = dir.path("input.png");
        let output = dir.path("output.jpg");
        write_png(&input, &DynamicImage::ImageRgb8(noise(64, 64)));

        let err = compress_image(&input, &output, 1).unwrap_err();

        assert!(err.is_infeasible());
        assert_eq!(dir.entries(), vec!["input.png"]);
    }

    #[test]
    fn test_copy_policy_is_byte_identical() {
        let dir = ScratchDir::new("copy");
        let input = dir.path("input.jpg");
        let output = dir.path("output.jpg");
        write_jpeg(&input, &noise(16, 16), 80);

        let report = Compressor::new()
            .with_config(SearchConfig::new().with_small_source(SmallSourcePolicy::Copy))
            .compress(&CompressionRequest::new(&input, &output, 500))
            .unwrap();

        assert_eq!(report.strategy, Strategy::Copied);
        assert_eq!(report.output_bytes, report.source_bytes);
        assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    }

    #[test]
    fn test_garbage_input_fails_to_decode() {
        let dir = ScratchDir::new("garbage");
        let input = dir.path("input.jpg");
        let output = dir.path("output.jpg");
        fs::write(&input, b"this is not an image").unwrap();

        let err = compress_image(&input, &output, 500).unwrap_err();

        assert!(matches!(err, CompressError::Decode(_)));
        assert_eq!(dir.entries(), vec!["input.jpg"]);
    }

    #[test]
    fn test_gif_input_is_unsupported() {
        let dir = ScratchDir::new("gif");
        let input = dir.path("input.gif");
        let output = dir.path("output.gif");
        fs::write(&input, b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();

        let err = compress_image(&input, &output, 500).unwrap_err();

        assert!(matches!(err, CompressError::UnsupportedFormat(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = ScratchDir::new("missing");
        let err = compress_image(dir.path("input.jpg"), dir.path("output.jpg"), 500).unwrap_err();
        assert!(matches!(err, CompressError::NotFound { .. }));
    }
}
