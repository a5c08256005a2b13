//! The temporary file that holds one candidate encoding at a time.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{CompressError, CompressResult};
use crate::format::ImageFormat;
use crate::probe;

/// Temp path for candidates: the output path plus `_temp.<ext>`.
///
/// `photo.jpg` with a PNG source becomes `photo.jpg_temp.png`.
pub fn candidate_path(output: &Path, format: ImageFormat) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push("_temp.");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Owns the candidate path for one run.
///
/// Every [`write`](Self::write) overwrites the same file. The file is removed
/// on drop unless it was [`promote`](Self::promote)d to the output path.
#[derive(Debug)]
pub struct CandidateFile {
    path: PathBuf,
    written: bool,
}

impl CandidateFile {
    pub fn new(output: &Path, format: ImageFormat) -> Self {
        Self {
            path: candidate_path(output, format),
            written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the candidate contents and return the size now on disk.
    pub fn write(&mut self, bytes: &[u8]) -> CompressResult<u64> {
        self.written = true;
        fs::write(&self.path, bytes).map_err(|e| CompressError::io(&self.path, e))?;
        probe::size_of(&self.path)
    }

    /// Rename the candidate onto `output`, consuming the guard.
    pub fn promote(mut self, output: &Path) -> CompressResult<()> {
        fs::rename(&self.path, output).map_err(|e| CompressError::io(output, e))?;
        self.written = false;
        Ok(())
    }
}

impl Drop for CandidateFile {
    fn drop(&mut self) {
        if !self.written {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove candidate file"
            ),
        }
    }
}
