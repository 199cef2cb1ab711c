//! Shared store utilities.
//!
//! Helpers used by both the post and project stores: translating `std::io::Error` kinds into
//! tagged [`StoreError`] values, required-field checks and collection root creation.

use crate::config::CoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::storage::Filesystem;
use folio_types::ResourceId;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Maps an I/O failure on `path`, turning `NotFound` into [`StoreError::NotFound`] with
/// `missing` as its message.
pub(crate) fn map_not_found(
    path: &Path,
    err: io::Error,
    missing: impl FnOnce() -> String,
) -> StoreError {
    if err.kind() == ErrorKind::NotFound {
        StoreError::NotFound(missing())
    } else {
        StoreError::io(path, err)
    }
}

/// Returns the field value if present and non-empty.
///
/// # Errors
///
/// Returns [`StoreError::Validation`] with `"<field> is required"` otherwise.
pub(crate) fn require<'a>(value: Option<&'a str>, field: &str) -> StoreResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StoreError::Validation(format!("{field} is required"))),
    }
}

/// Presence check followed by identifier validation.
pub(crate) fn require_id(value: Option<&str>) -> StoreResult<ResourceId> {
    let raw = require(value, "id")?;
    Ok(ResourceId::parse(raw)?)
}

/// Creates the posts and projects roots if they are absent.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if either directory cannot be created.
pub fn ensure_collection_roots(fs: &dyn Filesystem, cfg: &CoreConfig) -> StoreResult<()> {
    for dir in [cfg.posts_dir(), cfg.projects_dir()] {
        if !fs.is_dir(&dir) {
            tracing::info!("creating storage directory {}", dir.display());
        }
        fs.create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    }
    Ok(())
}
