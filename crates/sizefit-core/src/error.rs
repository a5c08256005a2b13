//! Error type shared by every stage of a compression run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while compressing an image to a size ceiling.
#[derive(Debug, Error)]
pub enum CompressError {
    /// Open, stat, create, write or rename failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The bytes are not a recognisable image, or are malformed or truncated.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The container was recognised but is neither JPEG nor PNG.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected the image for a reason other than I/O.
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Every quality in the schedule produced a file above the ceiling.
    #[error(
        "Failed to compress image to {ceiling_bytes} bytes \
         (smallest candidate was {smallest_bytes} bytes after {attempts} attempts)"
    )]
    CompressionInfeasible {
        ceiling_bytes: u64,
        smallest_bytes: u64,
        attempts: usize,
    },

    /// The search configuration cannot produce a valid schedule.
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

impl CompressError {
    /// Wrap an I/O error with the path it happened on.
    ///
    /// `NotFound` errors get their own variant so callers can tell a missing
    /// input apart from a failing disk.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn unsupported<T: Into<String>>(msg: T) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    /// True when the run failed only because the ceiling was unreachable.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::CompressionInfeasible { .. })
    }
}

/// Convenience result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;
