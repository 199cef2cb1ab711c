//! Temporary uploaded files.
//!
//! Multipart decoding stages each uploaded image as a [`TempUpload`] in the configured upload
//! directory. Ownership then moves into a store operation, which copies the bytes into place and
//! releases the file. The backing [`NamedTempFile`] removes itself when dropped, so the upload
//! never outlives the request even when the store operation fails part-way.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A request-scoped uploaded file.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
    original_name: Option<String>,
}

impl TempUpload {
    /// Creates an empty upload file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the temporary file cannot be created (for example when `dir`
    /// does not exist).
    pub fn new_in(dir: &Path, original_name: Option<String>) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(dir)?;
        Ok(Self {
            file,
            original_name,
        })
    }

    /// Creates an upload file inside `dir` holding `bytes`.
    pub fn from_bytes_in(
        dir: &Path,
        original_name: Option<String>,
        bytes: &[u8],
    ) -> io::Result<Self> {
        let mut upload = Self::new_in(dir, original_name)?;
        upload.append(bytes)?;
        Ok(upload)
    }

    /// Appends a chunk of the uploaded body.
    pub fn append(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Client-supplied filename, kept for logging only; it never influences the stored name.
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Reads the full uploaded content.
    pub fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        self.file.flush()?;
        std::fs::read(self.file.path())
    }

    /// Deletes the temporary file, reporting (but not failing on) removal errors.
    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!("failed to remove temporary upload {}: {}", path.display(), e);
        }
    }
}
