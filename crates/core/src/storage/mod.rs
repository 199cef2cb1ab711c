//! Filesystem abstraction behind the resource stores.
//!
//! The stores only ever talk to a [`Filesystem`], never to `std::fs` directly. Production uses
//! [`LocalFs`]; unit tests use [`MemoryFs`] so the identifier-to-path mapping can be exercised
//! without disk I/O.
//!
//! Implementations report failures as plain `std::io::Error` values and must use
//! `ErrorKind::NotFound` and `ErrorKind::AlreadyExists` consistently; the stores translate
//! those kinds into tagged [`StoreError`](crate::StoreError) variants.

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;

use std::io;
use std::path::Path;

/// One entry returned by [`Filesystem::read_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    /// Final path component (file or directory name).
    pub name: String,
    pub is_dir: bool,
}

/// Filesystem operations used by the resource stores.
pub trait Filesystem: Send + Sync + std::fmt::Debug {
    /// Reads UTF-8 text from a file.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Creates or truncates a file with the given bytes.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Creates a single directory; fails with `AlreadyExists` if anything is at `path`.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Ensures a directory exists, creating parents as needed.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Lists the direct children of a directory in enumeration order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;
}
