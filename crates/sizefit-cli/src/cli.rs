//! Command-line arguments and how they map onto a compression run.

use std::path::{Path, PathBuf};

use clap::Parser;
use sizefit_core::{CompressionRequest, ImageFormat, SearchConfig, SmallSourcePolicy};

pub const DEFAULT_INPUT: &str = "input.jpg";
pub const DEFAULT_OUTPUT: &str = "output.jpg";
pub const DEFAULT_MAX_SIZE_KB: u64 = 500;

#[derive(Parser, Debug)]
#[command(name = "sizefit")]
#[command(
    version,
    about = "Re-encode a JPEG or PNG until it fits under a size limit",
    long_about = None
)]
pub struct Args {
    /// Image to compress (JPEG or PNG)
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the result
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Size ceiling in kilobytes (1 KB = 1024 bytes)
    #[arg(default_value_t = DEFAULT_MAX_SIZE_KB)]
    pub max_size_kb: u64,

    /// Copy sources that already fit instead of re-encoding them
    #[arg(long)]
    pub copy_small: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn request(&self) -> CompressionRequest {
        CompressionRequest::new(&self.input, &self.output, self.max_size_kb)
    }

    pub fn search_config(&self) -> SearchConfig {
        let policy = if self.copy_small {
            SmallSourcePolicy::Copy
        } else {
            SmallSourcePolicy::Reencode
        };
        SearchConfig::new().with_small_source(policy)
    }
}

/// True when `output` is not named for the format that was written to it.
///
/// The output keeps the source's format whatever its name says, so a PNG
/// source written to `photo.jpg` is still PNG data.
pub fn extension_mismatch(output: &Path, format: ImageFormat) -> bool {
    let named = output
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension);
    named != Some(format)
}
