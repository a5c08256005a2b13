//! Size prober: current on-disk byte length of a file.

use std::fs;
use std::path::Path;

use crate::error::{CompressError, CompressResult};

/// Get a file's size in bytes.
///
/// Always stats the file; nothing is cached between calls.
pub fn size_of(path: impl AsRef<Path>) -> CompressResult<u64> {
    let path = path.as_ref();
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| CompressError::io(path, e))
}
