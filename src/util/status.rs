//! Plain-text status file holding the number of active lightweight tasks.
//!
//! External monitors poll the file; it always contains a single decimal integer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Status file location.
#[derive(Debug, Clone)]
pub struct StatusFile {
    path: PathBuf,
}

impl StatusFile {
    /// Status file at `path`. Nothing is written until [`StatusFile::write`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or truncate the file with `count`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write(&self, count: usize) -> io::Result<()> {
        fs::write(&self.path, count.to_string())?;
        info!(path = %self.path.display(), count = count, "Status file updated");
        Ok(())
    }

    /// Like [`StatusFile::write`], logging failures instead of returning them.
    pub fn write_or_warn(&self, count: usize) {
        if let Err(e) = self.write(count) {
            warn!(path = %self.path.display(), error = %e, "Failed to write status file");
        }
    }

    /// Read the current value back.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file is missing or does not hold an integer.
    pub fn read(&self) -> io::Result<usize> {
        fs::read_to_string(&self.path)?
            .trim()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
