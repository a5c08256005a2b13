//! Outcome of a successful compression run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::ImageFormat;

/// One candidate encoding that was written and measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub quality: u8,
    pub size_bytes: u64,
}

/// How the output file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Source already fit; re-encoded once and written directly.
    Reencoded,
    /// Source already fit; original bytes written unchanged.
    Copied,
    /// Found by the descending search and promoted from the temp file.
    Searched,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub output: PathBuf,
    pub format: ImageFormat,
    pub strategy: Strategy,
    pub source_bytes: u64,
    pub output_bytes: u64,
    /// Quality of the written encoding; `None` for a copied source.
    pub quality: Option<u8>,
    /// Search candidates in the order tried. Empty unless `strategy` is `Searched`.
    pub attempts: Vec<Attempt>,
}
