//! Quality search controller.
//!
//! Decodes the source once, then walks the quality schedule from high to low,
//! writing each candidate to a single temp file and measuring it, until one
//! fits under the ceiling or the schedule runs out.
//!
//! The walk is linear: encoded size is not guaranteed to shrink smoothly with
//! quality, so a bisection could stop on the wrong side of the ceiling.

mod candidate;
mod config;
mod report;

pub use candidate::{candidate_path, CandidateFile};
pub use config::{SearchConfig, SmallSourcePolicy};
pub use report::{Attempt, CompressionReport, Strategy};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::codec::{Codec, ImageCodec, SourceImage};
use crate::error::{CompressError, CompressResult};
use crate::probe;

/// Bytes per kilobyte for the size ceiling.
pub const BYTES_PER_KB: u64 = 1024;

/// Input path, output path and size ceiling for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Ceiling in kilobytes (1 KB = 1024 bytes).
    pub max_size_kb: u64,
}

impl CompressionRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, max_size_kb: u64) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            max_size_kb,
        }
    }

    /// The ceiling in bytes.
    pub fn ceiling_bytes(&self) -> u64 {
        self.max_size_kb.saturating_mul(BYTES_PER_KB)
    }
}

/// Runs the quality search with a codec and a search configuration.
///
/// Holds no per-run state; one `Compressor` can serve any number of
/// requests, as long as concurrent requests do not share an output path.
#[derive(Debug, Clone)]
pub struct Compressor<C = ImageCodec> {
    codec: C,
    config: SearchConfig,
}

impl Default for Compressor<ImageCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor<ImageCodec> {
    /// Compressor with the `image`-backed codec and default search settings.
    pub fn new() -> Self {
        Self::with_codec(ImageCodec)
    }
}

impl<C: Codec> Compressor<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Compress `request.input` into `request.output` under the ceiling.
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` if the search configuration is unusable
    /// * `NotFound` / `Io` if the input cannot be read or an output cannot be written
    /// * `Decode` / `UnsupportedFormat` from the codec, before the input is measured
    /// * `CompressionInfeasible` if no quality in the schedule fits; nothing is
    ///   written to the output path in that case
    pub fn compress(&self, request: &CompressionRequest) -> CompressResult<CompressionReport> {
        self.config.validate()?;

        let bytes = fs::read(&request.input).map_err(|e| CompressError::io(&request.input, e))?;
        let source = self.codec.decode(&bytes)?;

        let source_bytes = probe::size_of(&request.input)?;
        let ceiling = request.ceiling_bytes();

        info!(
            input = %request.input.display(),
            format = %source.format(),
            width = source.width(),
            height = source.height(),
            source_bytes,
            ceiling,
            "compressing image"
        );

        if source_bytes <= ceiling {
            return self.write_small_source(request, &source, &bytes, source_bytes);
        }

        self.search(request, &source, source_bytes, ceiling)
    }

    /// The source already fits: write it once, without the temp file.
    fn write_small_source(
        &self,
        request: &CompressionRequest,
        source: &SourceImage,
        original: &[u8],
        source_bytes: u64,
    ) -> CompressResult<CompressionReport> {
        info!("image is already smaller than or equal to the maximum size");

        let (encoded, quality, strategy) = match self.config.small_source {
            SmallSourcePolicy::Reencode => {
                let quality = self.config.reencode_quality;
                let encoded = self.codec.encode(source, quality)?;
                (encoded, Some(quality), Strategy::Reencoded)
            }
            SmallSourcePolicy::Copy => (original.to_vec(), None, Strategy::Copied),
        };

        write_output(&request.output, &encoded)?;
        let output_bytes = probe::size_of(&request.output)?;

        Ok(CompressionReport {
            output: request.output.clone(),
            format: source.format(),
            strategy,
            source_bytes,
            output_bytes,
            quality,
            attempts: Vec::new(),
        })
    }

    fn search(
        &self,
        request: &CompressionRequest,
        source: &SourceImage,
        source_bytes: u64,
        ceiling: u64,
    ) -> CompressResult<CompressionReport> {
        let mut candidate = CandidateFile::new(&request.output, source.format());
        let mut attempts = Vec::new();

        for quality in self.config.qualities() {
            let encoded = self.codec.encode(source, quality)?;
            let size_bytes = candidate.write(&encoded)?;
            attempts.push(Attempt {
                quality,
                size_bytes,
            });

            if size_bytes <= ceiling {
                candidate.promote(&request.output)?;
                info!(
                    output = %request.output.display(),
                    size_bytes,
                    quality,
                    "image compressed"
                );
                return Ok(CompressionReport {
                    output: request.output.clone(),
                    format: source.format(),
                    strategy: Strategy::Searched,
                    source_bytes,
                    output_bytes: size_bytes,
                    quality: Some(quality),
                    attempts,
                });
            }

            info!(size_bytes, quality, "candidate above ceiling");
        }

        let smallest_bytes = attempts
            .iter()
            .map(|a| a.size_bytes)
            .min()
            .unwrap_or(source_bytes);
        warn!(
            ceiling,
            smallest_bytes,
            attempts = attempts.len(),
            "no quality met the ceiling"
        );

        Err(CompressError::CompressionInfeasible {
            ceiling_bytes: ceiling,
            smallest_bytes,
            attempts: attempts.len(),
        })
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> CompressResult<()> {
    debug!(path = %path.display(), len = bytes.len(), "writing output");
    fs::write(path, bytes).map_err(|e| CompressError::io(path, e))
}
